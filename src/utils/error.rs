use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

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

    #[error("Failed to load candidate data from '{path}': {message}")]
    CandidateLoadError { path: String, message: String },

    #[error("No candidate data could be loaded ({attempted} file(s) attempted)")]
    NoCandidatesError { attempted: usize },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Input,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RankError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RankError::IoError(_) => ErrorCategory::Io,
            RankError::ConfigError { .. }
            | RankError::ConfigValidationError { .. }
            | RankError::InvalidConfigValueError { .. }
            | RankError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RankError::SerializationError(_)
            | RankError::CandidateLoadError { .. }
            | RankError::NoCandidatesError { .. } => ErrorCategory::Input,
            RankError::CsvError(_) | RankError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // a single unreadable file is skipped, the run goes on
            RankError::CandidateLoadError { .. } => ErrorSeverity::Low,
            RankError::SerializationError(_) => ErrorSeverity::Medium,
            RankError::ConfigError { .. }
            | RankError::ConfigValidationError { .. }
            | RankError::InvalidConfigValueError { .. }
            | RankError::MissingConfigError { .. }
            | RankError::NoCandidatesError { .. }
            | RankError::ProcessingError { .. }
            | RankError::CsvError(_) => ErrorSeverity::High,
            RankError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RankError::IoError(_) => {
                "Check that the paths exist and that the output directory is writable".to_string()
            }
            RankError::SerializationError(_) => {
                "Make sure the candidate file is valid JSON matching the profile schema".to_string()
            }
            RankError::CsvError(_) => "Retry with --format text,json to skip CSV output".to_string(),
            RankError::ConfigError { .. } | RankError::ConfigValidationError { .. } => {
                "Review the TOML configuration file for syntax errors".to_string()
            }
            RankError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and try again", field)
            }
            RankError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            RankError::CandidateLoadError { path, .. } => {
                format!("Fix or remove '{}'; the other candidates are still ranked", path)
            }
            RankError::NoCandidatesError { .. } => {
                "Pass at least one readable candidate JSON file".to_string()
            }
            RankError::ProcessingError { .. } => {
                "Run again with --verbose to see the failing step".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RankError::NoCandidatesError { .. } => "No valid CV files loaded.".to_string(),
            RankError::CandidateLoadError { path, message } => {
                format!("Error loading {}: {}", path, message)
            }
            RankError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            RankError::MissingConfigError { field } => {
                format!("Missing setting '{}'", field)
            }
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, RankError>;
