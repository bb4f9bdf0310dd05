//! Section (materialized solution slot).
//!
//! A section is a concrete (course, period, instructor, roster) slot built
//! after solving. Sections are created empty and grow while individuals
//! are attached; afterwards they are read-only results.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::{Course, Tag};

/// Index of a section in the materialized section list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SectionId(pub usize);

/// Deduplication key: (course code, period, instructor or unset).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionKey {
    pub code: String,
    pub period: usize,
    pub instructor: Option<Tag>,
}

impl SectionKey {
    /// Key of a candidate section that has no instructor yet.
    pub fn unassigned(code: impl Into<String>, period: usize) -> Self {
        Self {
            code: code.into(),
            period,
            instructor: None,
        }
    }
}

/// A course taught in a given period.
#[derive(Debug, Clone)]
pub struct Section {
    /// Position in the section list.
    pub id: SectionId,
    /// Course taught.
    pub course: Course,
    /// Period the section meets in.
    pub period: usize,
    instructor: Option<Tag>,
    roster: BTreeSet<Tag>,
}

impl Section {
    /// Creates an empty section with no instructor.
    pub fn new(id: SectionId, course: Course, period: usize) -> Self {
        Self {
            id,
            course,
            period,
            instructor: None,
            roster: BTreeSet::new(),
        }
    }

    /// Current deduplication key.
    pub fn key(&self) -> SectionKey {
        SectionKey {
            code: self.course.code.clone(),
            period: self.period,
            instructor: self.instructor,
        }
    }

    /// Whether this section matches a key.
    pub fn matches(&self, key: &SectionKey) -> bool {
        self.course.code == key.code
            && self.period == key.period
            && self.instructor == key.instructor
    }

    /// Teacher tag, if an instructor is bound.
    pub fn instructor(&self) -> Option<Tag> {
        self.instructor
    }

    /// Binds (or clears) the instructor.
    pub fn change_instructor(&mut self, instructor: Option<Tag>) {
        self.instructor = instructor;
    }

    /// Adds a student to the roster. Returns `false` if already enrolled.
    pub fn add_student(&mut self, student: Tag) -> bool {
        self.roster.insert(student)
    }

    /// Removes a student from the roster. No-op if absent.
    pub fn remove_student(&mut self, student: Tag) -> bool {
        self.roster.remove(&student)
    }

    /// Enrolled students in tag order.
    pub fn roster(&self) -> impl Iterator<Item = Tag> + '_ {
        self.roster.iter().copied()
    }

    /// Number of enrolled students.
    pub fn roster_len(&self) -> usize {
        self.roster.len()
    }

    /// Whether a student is enrolled.
    pub fn has_student(&self, student: Tag) -> bool {
        self.roster.contains(&student)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Section({} @ period {}", self.course.code, self.period)?;
        match self.instructor {
            Some(t) => write!(f, ", instructor {t}")?,
            None => write!(f, ", no instructor")?,
        }
        write!(f, ", {} students)", self.roster.len())
    }
}
