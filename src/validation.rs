//! Input validation for timetabling problems.
//!
//! Checks structural integrity of a [`ProblemInput`] before any model is
//! built. Detects:
//! - Duplicate course codes
//! - Requests, alternates, or qualifications naming unknown courses
//! - Alternate electives that are not electives
//! - Zero periods or an empty catalog
//! - Teachers asking for more open periods than exist
//!
//! Infeasibility is *not* checked here; that is the solver's verdict.

use crate::models::CourseType;
use crate::problem::ProblemInput;
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two courses share the same code.
    DuplicateCourse,
    /// A student or teacher references a course not in the catalog.
    UnknownCourse,
    /// An alternate elective names a non-elective course.
    InvalidAlternate,
    /// The problem has no periods.
    NoPeriods,
    /// The problem has no courses.
    EmptyCatalog,
    /// A teacher requests more open periods than there are periods.
    ExcessOpenPeriods,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a problem input.
///
/// Checks:
/// 1. At least one period and one course
/// 2. No duplicate course codes
/// 3. Every student request and alternate names a known course
/// 4. Every alternate elective is of type ELECTIVE
/// 5. Every teacher qualification names a known course
/// 6. No teacher requests more open periods than exist
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(input: &ProblemInput) -> ValidationResult {
    let mut errors = Vec::new();

    if input.periods == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoPeriods,
            "Problem has no periods",
        ));
    }
    if input.courses.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyCatalog,
            "Problem has no courses",
        ));
    }

    let mut types: HashMap<&str, CourseType> = HashMap::new();
    for c in &input.courses {
        if types.insert(c.code.as_str(), c.course_type).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCourse,
                format!("Duplicate course code: {}", c.code),
            ));
        }
    }

    for (i, s) in input.students.iter().enumerate() {
        for code in &s.requests {
            if !types.contains_key(code.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCourse,
                    format!("Student {i} requests unknown course '{code}'"),
                ));
            }
        }
        let requested: HashSet<&str> = s.requests.iter().map(String::as_str).collect();
        for code in &s.alt_electives {
            match types.get(code.as_str()) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCourse,
                    format!("Student {i} lists unknown alternate '{code}'"),
                )),
                Some(CourseType::Elective) if !requested.contains(code.as_str()) => {}
                Some(CourseType::Elective) => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidAlternate,
                    format!("Student {i} lists '{code}' as both request and alternate"),
                )),
                Some(_) => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidAlternate,
                    format!("Student {i} lists non-elective '{code}' as alternate"),
                )),
            }
        }
    }

    for (i, t) in input.teachers.iter().enumerate() {
        for code in &t.qualifications {
            if !types.contains_key(code.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCourse,
                    format!("Teacher {i} qualified for unknown course '{code}'"),
                ));
            }
        }
        if t.requested_open_periods > input.periods {
            errors.push(ValidationError::new(
                ValidationErrorKind::ExcessOpenPeriods,
                format!(
                    "Teacher {i} requests {} open periods out of {}",
                    t.requested_open_periods, input.periods
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{StudentInput, TeacherInput};

    fn sample() -> ProblemInput {
        ProblemInput::new(2)
            .with_course("MATH", CourseType::Core)
            .with_course("ART", CourseType::Elective)
            .with_course("MUSIC", CourseType::Elective)
            .with_student(StudentInput::new(["MATH", "ART"]).with_alternates(["MUSIC"]))
            .with_teacher(TeacherInput::new(["MATH", "ART"]))
    }

    fn has_kind(input: &ProblemInput, kind: ValidationErrorKind) -> bool {
        validate_input(input)
            .err()
            .is_some_and(|errors| errors.iter().any(|e| e.kind == kind))
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample()).is_ok());
    }

    #[test]
    fn test_no_periods_and_empty_catalog() {
        let input = ProblemInput::new(0);
        assert!(has_kind(&input, ValidationErrorKind::NoPeriods));
        assert!(has_kind(&input, ValidationErrorKind::EmptyCatalog));
    }

    #[test]
    fn test_duplicate_course() {
        let input = sample().with_course("MATH", CourseType::Elective);
        assert!(has_kind(&input, ValidationErrorKind::DuplicateCourse));
    }

    #[test]
    fn test_unknown_request_and_qualification() {
        let input = sample()
            .with_student(StudentInput::new(["PHYSICS"]))
            .with_teacher(TeacherInput::new(["CHEM"]));
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::UnknownCourse)
                .count(),
            2
        );
    }

    #[test]
    fn test_invalid_alternates() {
        let core_alt = sample().with_student(StudentInput::new(["ART"]).with_alternates(["MATH"]));
        assert!(has_kind(&core_alt, ValidationErrorKind::InvalidAlternate));

        let both = sample().with_student(StudentInput::new(["ART"]).with_alternates(["ART"]));
        assert!(has_kind(&both, ValidationErrorKind::InvalidAlternate));
    }

    #[test]
    fn test_excess_open_periods() {
        let greedy = TeacherInput::new(["MATH"]).with_requested_open_periods(3);
        let input = sample().with_teacher(greedy);
        assert!(has_kind(&input, ValidationErrorKind::ExcessOpenPeriods));
    }

    #[test]
    fn test_multiple_errors() {
        let input = ProblemInput::new(0).with_student(StudentInput::new(["X"]));
        let errors = validate_input(&input).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
