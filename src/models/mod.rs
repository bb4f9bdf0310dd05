//! Timetabling domain models.
//!
//! Entities a timetable run is built from and the results it produces.
//!
//! | Type | Role |
//! |------|------|
//! | `Course`, `Catalog` | Immutable course identities and the shared course universe |
//! | `Schedule` | Period × course decision-variable matrix of one individual |
//! | `Student`, `Teacher` | Individuals owning a schedule and emitting constraints |
//! | `Individual` | Closed variant over students and teachers |
//! | `Section` | Materialized (course, period, instructor, roster) slot |

mod course;
mod individual;
mod schedule;
mod section;
mod student;
mod teacher;

pub use course::{Catalog, Course, CourseId, CourseType};
pub use individual::{Individual, Participant, Tag, TagAllocator};
pub use schedule::{Schedule, Slot};
pub use section::{Section, SectionId, SectionKey};
pub use student::Student;
pub use teacher::Teacher;
