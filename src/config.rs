//! Run configuration.
//!
//! Loaded from TOML; every field has a default, so an empty document (or a
//! missing file handled with `unwrap_or_default`) yields the standard
//! weights.
//!
//! ```
//! use timetable_ilp::config::TimetableConfig;
//!
//! let config = TimetableConfig::from_toml_str(r#"
//!     [objective]
//!     primary_elective_weight = 10.0
//!
//!     [coverage]
//!     exempt_off_courses = true
//! "#).unwrap();
//!
//! assert_eq!(config.objective.primary_elective_weight, 10.0);
//! assert_eq!(config.objective.alternate_elective_weight, 1.0);
//! assert!(config.coverage.exempt_off_courses);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TimetableConfig {
    /// Objective weights.
    pub objective: ObjectiveWeights,
    /// Coverage (teacher-for-student) rule options.
    pub coverage: CoverageConfig,
    /// Run input validation before building the model.
    pub validate_input: bool,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            objective: ObjectiveWeights::default(),
            coverage: CoverageConfig::default(),
            validate_input: true,
        }
    }
}

/// Weights of the preference-cost objective.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    /// Cost of an unmet primary elective request.
    pub primary_elective_weight: f64,
    /// Cost of an unmet alternate elective.
    pub alternate_elective_weight: f64,
    /// Cost per teacher cell set to 1.
    pub teaching_load_weight: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            primary_elective_weight: 5.0,
            alternate_elective_weight: 1.0,
            teaching_load_weight: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Exempt off courses from coverage. Disabled by default, so every
    /// attended (period, course) cell needs a qualified teacher.
    pub exempt_off_courses: bool,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            exempt_off_courses: false,
        }
    }
}

impl TimetableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, isn't valid TOML, or holds
    /// invalid values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the objective weights.
    pub fn with_objective(mut self, objective: ObjectiveWeights) -> Self {
        self.objective = objective;
        self
    }

    /// Sets whether off courses are exempt from coverage.
    pub fn with_off_exemption(mut self, exempt: bool) -> Self {
        self.coverage.exempt_off_courses = exempt;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("primary_elective_weight", self.objective.primary_elective_weight),
            ("alternate_elective_weight", self.objective.alternate_elective_weight),
            ("teaching_load_weight", self.objective.teaching_load_weight),
        ];
        for (name, w) in weights {
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite non-negative number, got {w}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TimetableConfig::default();
        assert_eq!(config.objective.primary_elective_weight, 5.0);
        assert_eq!(config.objective.alternate_elective_weight, 1.0);
        assert_eq!(config.objective.teaching_load_weight, 0.0);
        assert!(!config.coverage.exempt_off_courses);
        assert!(config.validate_input);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = TimetableConfig::from_toml_str("").unwrap();
        assert_eq!(config, TimetableConfig::default());
    }

    #[test]
    fn test_rejects_negative_weight() {
        let err = TimetableConfig::from_toml_str(
            r#"
            [objective]
            teaching_load_weight = -1.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = TimetableConfig::from_toml_str("objective = [").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TimetableConfig::load("/nonexistent/timetable.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        let config = TimetableConfig::load("/nonexistent/timetable.toml").unwrap_or_default();
        assert!(config.validate_input);
    }
}
