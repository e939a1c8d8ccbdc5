use thiserror::Error;

#[derive(Error, Debug)]
pub enum LitmusError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No litmus test matches the selection")]
    EmptySelection,

    #[error("Litmus thread P{thread} panicked")]
    ThreadPanicked { thread: usize },

    #[error("Litmus test {test} failed: {message}")]
    TestFailed { test: String, message: String },

    #[error("Execution error: {message}")]
    ExecutionError { message: String },

    #[error("Forbidden outcome observed in: {}", .tests.join(", "))]
    ForbiddenOutcome { tests: Vec<String> },
}

pub type Result<T> = std::result::Result<T, LitmusError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Execution,
    Model,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LitmusError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LitmusError::PatternError(_)
            | LitmusError::ConfigValidationError { .. }
            | LitmusError::InvalidConfigValueError { .. }
            | LitmusError::MissingConfigError { .. }
            | LitmusError::EmptySelection => ErrorCategory::Configuration,
            LitmusError::IoError(_)
            | LitmusError::SerializationError(_)
            | LitmusError::CsvError(_) => ErrorCategory::Io,
            LitmusError::ThreadPanicked { .. }
            | LitmusError::TestFailed { .. }
            | LitmusError::ExecutionError { .. } => ErrorCategory::Execution,
            LitmusError::ForbiddenOutcome { .. } => ErrorCategory::Model,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Execution => ErrorSeverity::Critical,
            ErrorCategory::Model => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LitmusError::IoError(_) | LitmusError::CsvError(_) => {
                "Check that the output path exists and is writable"
            }
            LitmusError::SerializationError(_) => "Re-run with --formats text to skip JSON output",
            LitmusError::PatternError(_) => {
                "Fix the include/exclude regular expression (see --list for test names)"
            }
            LitmusError::ConfigValidationError { .. }
            | LitmusError::InvalidConfigValueError { .. }
            | LitmusError::MissingConfigError { .. } => {
                "Review the configuration values and their allowed ranges"
            }
            LitmusError::EmptySelection => {
                "Widen the include patterns or families; use --list to see available tests"
            }
            LitmusError::ThreadPanicked { .. } | LitmusError::TestFailed { .. } => {
                "Re-run the single test with --verbose to capture the failing execution"
            }
            LitmusError::ExecutionError { .. } => "Lower --concurrency and retry",
            LitmusError::ForbiddenOutcome { .. } => {
                "Inspect the histogram in litmus.log; check the primitive mapping and compiler output"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LitmusError::EmptySelection => "No litmus tests were selected".to_string(),
            LitmusError::ForbiddenOutcome { tests } => format!(
                "{} test(s) observed an outcome their memory model forbids: {}",
                tests.len(),
                tests.join(", ")
            ),
            LitmusError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            LitmusError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_outcome_is_model_error() {
        let err = LitmusError::ForbiddenOutcome {
            tests: vec!["SB+fencembonceonces".to_string()],
        };
        assert_eq!(err.category(), ErrorCategory::Model);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("SB+fencembonceonces"));
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = LitmusError::InvalidConfigValueError {
            field: "iterations".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(
            err.user_friendly_message(),
            "Invalid setting 'iterations': Value must be at least 1"
        );
    }

    #[test]
    fn test_thread_panic_is_critical() {
        let err = LitmusError::ThreadPanicked { thread: 2 };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.to_string(), "Litmus thread P2 panicked");
    }
}
