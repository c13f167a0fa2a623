//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (parallelism > 0)
//! - Detect conflicting marker names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BootConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::{BootConfig, SweepMode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("startup.{field} must not be empty")]
    EmptyMarker { field: &'static str },

    #[error("startup_marker and singleton_marker must differ (both are {0:?})")]
    DuplicateMarker(String),

    #[error("startup.max_parallelism must be at least 1 for the parallel sweep")]
    ZeroParallelism,

    #[error("observability.log_level {level:?} is not a valid filter: {reason}")]
    InvalidLogLevel { level: String, reason: String },
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &BootConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let startup = &config.startup;

    if startup.startup_marker.trim().is_empty() {
        errors.push(ValidationError::EmptyMarker { field: "startup_marker" });
    }
    if startup.singleton_marker.trim().is_empty() {
        errors.push(ValidationError::EmptyMarker { field: "singleton_marker" });
    }
    if !startup.startup_marker.is_empty() && startup.startup_marker == startup.singleton_marker {
        errors.push(ValidationError::DuplicateMarker(startup.startup_marker.clone()));
    }

    if startup.sweep == SweepMode::Parallel && startup.max_parallelism == 0 {
        errors.push(ValidationError::ZeroParallelism);
    }

    if let Err(e) = EnvFilter::try_new(&config.observability.log_level) {
        errors.push(ValidationError::InvalidLogLevel {
            level: config.observability.log_level.clone(),
            reason: e.to_string(),
        });
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

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&BootConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = BootConfig::default();
        config.startup.singleton_marker = String::new();
        config.startup.sweep = SweepMode::Parallel;
        config.startup.max_parallelism = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyMarker { field: "singleton_marker" },
                ValidationError::ZeroParallelism,
            ]
        );
    }

    #[test]
    fn test_zero_parallelism_ignored_when_sequential() {
        let mut config = BootConfig::default();
        config.startup.max_parallelism = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_duplicate_markers() {
        let mut config = BootConfig::default();
        config.startup.singleton_marker = config.startup.startup_marker.clone();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DuplicateMarker("StartUp".into())]);
    }
}
