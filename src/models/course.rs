//! Course model and catalog.
//!
//! A course is an immutable identity object: its code is the identity,
//! its type decides whether a request for it is mandatory or off-time.
//! The catalog is the single ordered universe of courses shared by every
//! individual in a model, so positional indices line up across schedules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Positional index of a course inside its [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseId(pub usize);

impl CourseId {
    /// Column index in a schedule's decision matrix.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Course category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseType {
    /// Mandatory course.
    Core,
    /// Preference-driven course; contributes to the objective.
    Elective,
    /// Placeholder "course" occupying a requested free period.
    Off,
}

/// A course.
///
/// Equality and hashing use the course code only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Position in the catalog.
    pub id: CourseId,
    /// Unique course code.
    pub code: String,
    /// Course category.
    pub course_type: CourseType,
}

impl Course {
    /// Creates a course. Normally called through [`Catalog::add`].
    pub fn new(id: CourseId, code: impl Into<String>, course_type: CourseType) -> Self {
        Self {
            id,
            code: code.into(),
            course_type,
        }
    }

    /// Whether this course is an off-period placeholder.
    #[inline]
    pub fn is_off(&self) -> bool {
        self.course_type == CourseType::Off
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Course {}

impl Hash for Course {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Ordered course universe.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    by_code: HashMap<String, CourseId>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course and returns its id.
    ///
    /// Re-adding an existing code returns the existing id unchanged.
    pub fn add(&mut self, code: impl Into<String>, course_type: CourseType) -> CourseId {
        let code = code.into();
        if let Some(&id) = self.by_code.get(&code) {
            return id;
        }
        let id = CourseId(self.courses.len());
        self.by_code.insert(code.clone(), id);
        self.courses.push(Course::new(id, code, course_type));
        id
    }

    /// Looks up a course by code.
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.by_code.get(code).map(|id| &self.courses[id.index()])
    }

    /// Looks up a course by id.
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(id.index())
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_assigns_positional_ids() {
        let mut catalog = Catalog::new();
        let a = catalog.add("MATH", CourseType::Core);
        let b = catalog.add("ART", CourseType::Elective);
        assert_eq!(a, CourseId(0));
        assert_eq!(b, CourseId(1));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("ART").unwrap().course_type, CourseType::Elective);
        assert!(catalog.get("PE").is_none());
    }

    #[test]
    fn test_catalog_ignores_duplicate_code() {
        let mut catalog = Catalog::new();
        let a = catalog.add("MATH", CourseType::Core);
        let again = catalog.add("MATH", CourseType::Elective);
        assert_eq!(a, again);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("MATH").unwrap().course_type, CourseType::Core);
    }

    #[test]
    fn test_course_equality_by_code() {
        let a = Course::new(CourseId(0), "C0", CourseType::Core);
        let b = Course::new(CourseId(3), "C0", CourseType::Off);
        assert_eq!(a, b);
        assert!(b.is_off());
    }

    #[test]
    fn test_course_type_serde_names() {
        let json = serde_json::to_string(&CourseType::Elective).unwrap();
        assert_eq!(json, "\"ELECTIVE\"");
    }
}
