use std::path::PathBuf;
use thiserror::Error;

pub const LOG_PREFIX: &str = "[svdb]";

#[derive(Error, Debug)]
pub enum SvdbError {
    #[error("database file {path} not found: {reason}")]
    DatabaseNotFound { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("error decoding db file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("error compiling regular expression: {0}")]
    PatternError(#[from] regex::Error),

    #[error("service with port '{port}' not found in db")]
    KeyNotFound { port: String },

    #[error("error marshalling JSON: {0}")]
    FormatError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Load,
    Query,
    Render,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SvdbError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DatabaseNotFound { .. } | Self::IoError(_) | Self::ParseError { .. } => {
                ErrorCategory::Load
            }
            Self::PatternError(_) | Self::KeyNotFound { .. } => ErrorCategory::Query,
            Self::FormatError(_) => ErrorCategory::Render,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::KeyNotFound { .. } => ErrorSeverity::Low,
            Self::PatternError(_) | Self::FormatError(_) => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::DatabaseNotFound { .. } | Self::IoError(_) | Self::ParseError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 依嚴重程度對應的程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::DatabaseNotFound { .. } => {
                "Pass --seed with the bundled db.json, or point --db at an existing database"
            }
            Self::IoError(_) => "Check that the database file is readable",
            Self::ParseError { .. } => {
                "The database must be a JSON object mapping ports to arrays of services"
            }
            Self::PatternError(_) => "Check the regular expression syntax passed to --match",
            Self::KeyNotFound { .. } => "Try --match to search descriptions instead",
            Self::FormatError(_) => "Retry without --json",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Check the command line flags and config file",
            Self::MissingConfigError { .. } => "Set HOME or pass --db explicitly",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        format!("{} {}", LOG_PREFIX, self)
    }
}

pub type Result<T> = std::result::Result<T, SvdbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_found_is_a_notice() {
        let err = SvdbError::KeyNotFound {
            port: "9999".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.exit_code(), 0);
        assert_eq!(
            err.user_friendly_message(),
            "[svdb] service with port '9999' not found in db"
        );
    }

    #[test]
    fn test_load_errors_are_critical() {
        let err = SvdbError::DatabaseNotFound {
            path: PathBuf::from("/nope"),
            reason: "no seed configured".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Load);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_pattern_error_maps_to_query() {
        let err: SvdbError = regex::Regex::new("(").unwrap_err().into();
        assert_eq!(err.category(), ErrorCategory::Query);
        assert_eq!(err.exit_code(), 1);
        assert!(err
            .to_string()
            .starts_with("error compiling regular expression"));
    }
}
