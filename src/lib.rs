//! School timetabling as integer programming.
//!
//! Every student and teacher owns a period × course matrix of binary
//! decision variables. Scheduling rules compile to linear constraints over
//! those variables, an external solver binds them, and the bound cells are
//! materialized into deduplicated class sections.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Catalog`, `Schedule`,
//!   `Student`, `Teacher`, `Section`
//! - **`ilp`**: Linear expressions, constraints, the model, and the
//!   `SolverBackend` seam (`good_lp` by default)
//! - **`constraints`**: Rule → linear constraint compilers
//! - **`objective`**: Weighted elective-preference objective
//! - **`timetable`**: Run orchestration and section materialization
//! - **`problem`**, **`validation`**, **`generator`**: Input handling
//! - **`report`**, **`config`**, **`error`**: Ambient types
//!
//! # Pipeline
//!
//! ```text
//! ProblemInput ─validate─▶ Problem ─add_constraints─▶ IlpModel ─solve─▶ binding
//!                                                                         │
//!                         TimetableReport ◀─report── Sections ◀─materialize
//! ```
//!
//! Infeasibility is a normal outcome reported through [`SolveStatus`];
//! only malformed constraints, out-of-order calls, and bad input are
//! errors.

pub mod config;
pub mod constraints;
pub mod error;
pub mod generator;
pub mod ilp;
pub mod models;
pub mod objective;
pub mod problem;
pub mod report;
pub mod timetable;
pub mod validation;

pub use config::{ConfigError, CoverageConfig, ObjectiveWeights, TimetableConfig};
pub use error::{ConstraintOwner, Result, TimetableError};
pub use generator::ToyProblem;
pub use ilp::{GoodLpBackend, IlpModel, SolveOutcome, SolveStatus, SolverBackend};
pub use models::{
    Catalog, Course, CourseId, CourseType, Individual, Participant, Section, Student, Tag, Teacher,
};
pub use problem::{CourseInput, Problem, ProblemInput, StudentInput, TeacherInput};
pub use report::{SectionView, TimetableKpi, TimetableReport};
pub use timetable::{ModelPhase, Timetable};
