use crate::core::validator::Violation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cohort '{cohort}' failed validation with {} violation(s)", .violations.len())]
    ValidationError {
        cohort: String,
        violations: Vec<Violation>,
    },

    #[error("Unknown cohort: {id}")]
    UnknownCohortError { id: String },

    #[error("Dataset contains no usable cohorts")]
    EmptyDatasetError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Data,
    Selection,
    Io,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InsightError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InsightError::IoError(_) => ErrorCategory::Io,
            InsightError::SerializationError(_) | InsightError::CsvError(_) => {
                ErrorCategory::Export
            }
            InsightError::ConfigParseError { .. }
            | InsightError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            InsightError::ValidationError { .. } | InsightError::EmptyDatasetError => {
                ErrorCategory::Data
            }
            InsightError::UnknownCohortError { .. } => ErrorCategory::Selection,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 選錯 cohort 只是使用者操作，畫面維持原狀
            InsightError::UnknownCohortError { .. } => ErrorSeverity::Low,
            InsightError::SerializationError(_) | InsightError::CsvError(_) => {
                ErrorSeverity::Medium
            }
            InsightError::ConfigParseError { .. }
            | InsightError::InvalidConfigValueError { .. }
            | InsightError::ValidationError { .. } => ErrorSeverity::High,
            InsightError::IoError(_) | InsightError::EmptyDatasetError => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            InsightError::IoError(_) => {
                "Check that the dataset file exists and is readable".to_string()
            }
            InsightError::SerializationError(_) | InsightError::CsvError(_) => {
                "Check the exported values for non-finite numbers".to_string()
            }
            InsightError::ConfigParseError { .. } => {
                "Make sure the dataset file is valid TOML".to_string()
            }
            InsightError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the dataset file", field)
            }
            InsightError::ValidationError { cohort, .. } => format!(
                "Fix the listed violations for cohort '{}' or set validation.policy = \"skip_invalid\"",
                cohort
            ),
            InsightError::UnknownCohortError { .. } => {
                "Select one of the cohorts listed by the dataset".to_string()
            }
            InsightError::EmptyDatasetError => {
                "Add at least one valid [[cohorts]] entry".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            InsightError::ValidationError { cohort, violations } => {
                let details: Vec<String> = violations.iter().map(|v| format!("  - {}", v)).collect();
                format!(
                    "Cohort '{}' has invalid data:\n{}",
                    cohort,
                    details.join("\n")
                )
            }
            InsightError::UnknownCohortError { id } => {
                format!("There is no cohort called '{}'", id)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InsightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = InsightError::ValidationError {
            cohort: "whanauX".to_string(),
            violations: vec![
                Violation::TooFewStages { found: 2 },
                Violation::InvalidCost { value: 0.0 },
            ],
        };

        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("2 violation(s)"));

        let message = err.user_friendly_message();
        assert_eq!(message.lines().count(), 3);
        assert!(message.contains("at least 3"));
        assert!(message.contains("cost"));
    }

    #[test]
    fn test_unknown_cohort_is_low_severity() {
        let err = InsightError::UnknownCohortError {
            id: "whanauZ".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Selection);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().contains("whanauZ"));
    }

    #[test]
    fn test_config_errors_suggest_field() {
        let err = InsightError::InvalidConfigValueError {
            field: "validation.policy".to_string(),
            value: "loose".to_string(),
            reason: "unsupported".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.recovery_suggestion().contains("validation.policy"));
    }
}
