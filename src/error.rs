//! Error types.
//!
//! Structural and programmer errors abort a run. Infeasibility is not an
//! error: it is reported through [`SolveStatus`](crate::ilp::SolveStatus).

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::Tag;
use crate::validation::ValidationError;

/// Main error type for timetable runs.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// A constraint generator produced something that is not a legal linear
    /// (in)equality.
    #[error("{owner} constraint was illegal: {reason}")]
    IllegalConstraint { owner: ConstraintOwner, reason: String },

    /// Operation not permitted in the model's current phase.
    #[error("cannot {operation} while model is {phase}")]
    InvalidState {
        phase: &'static str,
        operation: &'static str,
    },

    /// Input failed validation.
    #[error("invalid input: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Source of a constraint, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOwner {
    Student(Tag),
    Teacher(Tag),
    Global,
}

impl std::fmt::Display for ConstraintOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintOwner::Student(t) => write!(f, "student {t}"),
            ConstraintOwner::Teacher(t) => write!(f, "teacher {t}"),
            ConstraintOwner::Global => f.write_str("global"),
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_messages() {
        let e = TimetableError::IllegalConstraint {
            owner: ConstraintOwner::Teacher(Tag(3)),
            reason: "constraint has no variable terms".into(),
        };
        assert_eq!(
            e.to_string(),
            "teacher #3 constraint was illegal: constraint has no variable terms"
        );

        let e = TimetableError::InvalidState {
            phase: "unbuilt",
            operation: "solve",
        };
        assert_eq!(e.to_string(), "cannot solve while model is unbuilt");

        let e = TimetableError::Validation(vec![ValidationError::new(
            ValidationErrorKind::UnknownCourse,
            "Student 0 requests unknown course 'X'",
        )]);
        assert!(e.to_string().contains("unknown course 'X'"));
    }
}
