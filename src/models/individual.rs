//! Individuals: the people being timetabled.
//!
//! [`Student`] and [`Teacher`] share one capability set, the
//! [`Participant`] trait, which is how the orchestrator and the
//! materializer reach them. [`Individual`] is the closed tagged variant over
//! the two, for callers that keep students and teachers in one collection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ilp::LinearConstraint;

use super::{Schedule, Section, Slot, Student, Teacher};

/// Unique, monotonically allocated identity of an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tag(pub u32);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Incrementing tag allocator.
///
/// One allocator serves one run; call [`TagAllocator::reset`] between
/// independent runs.
#[derive(Debug, Clone, Default)]
pub struct TagAllocator {
    next: u32,
}

impl TagAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unused tag.
    pub fn allocate(&mut self) -> Tag {
        let tag = Tag(self.next);
        self.next += 1;
        tag
    }

    /// Number of tags handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next
    }

    /// Restarts allocation at zero.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// Capabilities shared by students and teachers.
pub trait Participant {
    /// Identity tag.
    fn tag(&self) -> Tag;

    /// The individual's schedule.
    fn schedule(&self) -> &Schedule;

    /// Per-individual constraints, in deterministic order.
    ///
    /// The iterator is consumed once; call again for a fresh sequence.
    fn constraints(&self) -> Box<dyn Iterator<Item = LinearConstraint> + '_>;

    /// Records `section` in the schedule and, if its period was free, applies
    /// the variant side effect. Returns whether the section was accepted.
    fn add_section(&mut self, section: &mut Section) -> bool;

    /// Removes `section` from the schedule and undoes the side effect.
    /// No-op (returns `false`) if the section is not in the schedule.
    fn remove_section(&mut self, section: &mut Section) -> bool;

    /// Attaches the individual to `section` (roster or instructor) and
    /// records it in the schedule. Nothing changes if the period is taken.
    fn add_to_section(&mut self, section: &mut Section) {
        self.add_section(section);
    }

    /// Variant-specific satisfaction of open/off time.
    fn open_score(&self) -> usize;

    /// Periods without instruction.
    fn free_periods(&self) -> Vec<usize>;

    /// Number of free periods requested.
    fn requested_off(&self) -> usize;

    /// Positive when more periods are free than requested, negative when
    /// fewer.
    fn off_delta(&self) -> isize {
        self.free_periods().len() as isize - self.requested_off() as isize
    }

    /// Sections recorded in the schedule, as (period, slot) in period order.
    fn sections(&self) -> Vec<(usize, Slot)> {
        self.schedule().sections().collect()
    }

    /// Whether any free period falls in `lunch_periods`.
    fn has_potential_lunch_slot(&self, lunch_periods: &[usize]) -> bool {
        self.free_periods().iter().any(|p| lunch_periods.contains(p))
    }
}

/// A student or a teacher.
#[derive(Debug, Clone)]
pub enum Individual {
    Student(Student),
    Teacher(Teacher),
}

impl Individual {
    pub fn as_student(&self) -> Option<&Student> {
        match self {
            Individual::Student(s) => Some(s),
            Individual::Teacher(_) => None,
        }
    }

    pub fn as_teacher(&self) -> Option<&Teacher> {
        match self {
            Individual::Teacher(t) => Some(t),
            Individual::Student(_) => None,
        }
    }

    fn participant(&self) -> &dyn Participant {
        match self {
            Individual::Student(s) => s,
            Individual::Teacher(t) => t,
        }
    }

    fn participant_mut(&mut self) -> &mut dyn Participant {
        match self {
            Individual::Student(s) => s,
            Individual::Teacher(t) => t,
        }
    }

    /// "student" or "teacher".
    pub fn kind(&self) -> &'static str {
        match self {
            Individual::Student(_) => "student",
            Individual::Teacher(_) => "teacher",
        }
    }
}

impl Participant for Individual {
    fn tag(&self) -> Tag {
        self.participant().tag()
    }

    fn schedule(&self) -> &Schedule {
        self.participant().schedule()
    }

    fn constraints(&self) -> Box<dyn Iterator<Item = LinearConstraint> + '_> {
        self.participant().constraints()
    }

    fn add_section(&mut self, section: &mut Section) -> bool {
        self.participant_mut().add_section(section)
    }

    fn remove_section(&mut self, section: &mut Section) -> bool {
        self.participant_mut().remove_section(section)
    }

    fn open_score(&self) -> usize {
        self.participant().open_score()
    }

    fn free_periods(&self) -> Vec<usize> {
        self.participant().free_periods()
    }

    fn requested_off(&self) -> usize {
        self.participant().requested_off()
    }
}

impl From<Student> for Individual {
    fn from(s: Student) -> Self {
        Individual::Student(s)
    }
}

impl From<Teacher> for Individual {
    fn from(t: Teacher) -> Self {
        Individual::Teacher(t)
    }
}
