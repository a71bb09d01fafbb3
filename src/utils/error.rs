use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    #[error("Invalid chapter id '{value}': {reason}")]
    InvalidChapterId { value: String, reason: String },

    #[error("Position {position} is out of range for a sequence of {len} items")]
    IndexOutOfRange { position: isize, len: usize },

    #[error("Cannot {operation} on an empty sequence")]
    EmptySequence { operation: String },

    #[error("Cannot {operation} with a zero vector")]
    ZeroVector { operation: String },

    #[error("Division by zero: {message}")]
    DivisionByZero { message: String },

    #[error("Invalid bounds for {operation}: min {min} must not exceed max {max}")]
    InvalidBounds { operation: String, min: f64, max: f64 },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Workspace error at {path}: {message}")]
    WorkspaceError { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Usage,
    Workspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WorkbenchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WorkbenchError::IoError(_) => ErrorCategory::Io,
            WorkbenchError::SerializationError(_)
            | WorkbenchError::CsvError(_)
            | WorkbenchError::TomlWriteError(_) => ErrorCategory::Data,
            WorkbenchError::TomlParseError(_)
            | WorkbenchError::ConfigValidationError { .. }
            | WorkbenchError::InvalidConfigValueError { .. }
            | WorkbenchError::MissingConfigError { .. } => ErrorCategory::Configuration,
            WorkbenchError::InvalidChapterId { .. }
            | WorkbenchError::IndexOutOfRange { .. }
            | WorkbenchError::EmptySequence { .. }
            | WorkbenchError::ZeroVector { .. }
            | WorkbenchError::DivisionByZero { .. }
            | WorkbenchError::InvalidBounds { .. } => ErrorCategory::Usage,
            WorkbenchError::WorkspaceError { .. } => ErrorCategory::Workspace,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Usage => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Workspace | ErrorCategory::Data => {
                ErrorSeverity::High
            }
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            // 檔案系統錯誤
            WorkbenchError::IoError(e) => format!("File system operation failed: {}", e),
            WorkbenchError::InvalidChapterId { value, .. } => {
                format!("'{}' is not a valid chapter name", value)
            }
            WorkbenchError::WorkspaceError { path, message } => {
                format!("Chapter workspace problem in {}: {}", path, message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WorkbenchError::IoError(_) => "Check that the workspace root exists and is writable",
            WorkbenchError::InvalidChapterId { .. } => {
                "Use the form chNN_topic, e.g. ch01_data_model"
            }
            WorkbenchError::IndexOutOfRange { .. } => {
                "Use a position between -len and len - 1"
            }
            WorkbenchError::EmptySequence { .. } => "Provide at least one item",
            WorkbenchError::ZeroVector { .. } | WorkbenchError::DivisionByZero { .. } => {
                "Use a non-zero vector or divisor"
            }
            WorkbenchError::InvalidBounds { .. } => "Pass numeric bounds with min <= max",
            WorkbenchError::TomlParseError(_)
            | WorkbenchError::ConfigValidationError { .. }
            | WorkbenchError::InvalidConfigValueError { .. }
            | WorkbenchError::MissingConfigError { .. } => {
                "Fix workbench.toml or the command line arguments and retry"
            }
            WorkbenchError::WorkspaceError { .. } => {
                "Run `fluent-workbench init <chapter>` to restore the missing pieces"
            }
            WorkbenchError::SerializationError(_)
            | WorkbenchError::CsvError(_)
            | WorkbenchError::TomlWriteError(_) => "Retry with --verbose to see the failing record",
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkbenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_errors_are_medium_severity() {
        let err = WorkbenchError::EmptySequence {
            operation: "find high card".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.to_string(), "Cannot find high card on an empty sequence");
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err: WorkbenchError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(
            err.user_friendly_message(),
            "File system operation failed: denied"
        );
    }

    #[test]
    fn test_invalid_bounds_is_a_usage_error() {
        let err = WorkbenchError::InvalidBounds {
            operation: "clamp".to_string(),
            min: 1.0,
            max: 0.0,
        };
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert_eq!(err.recovery_suggestion(), "Pass numeric bounds with min <= max");
    }
}
