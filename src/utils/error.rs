use thiserror::Error;

#[derive(Error, Debug)]
pub enum SleftError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("{message}")]
    ValidationError { field: String, message: String },

    #[error("No referral partners found for specialty: {specialty}")]
    UnknownSpecialty { specialty: String },

    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    #[error("{service} returned status {status}: {message}")]
    ExternalServiceError {
        service: String,
        status: u16,
        message: String,
    },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    External,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SleftError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        SleftError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SleftError::ValidationError { .. }
            | SleftError::UnknownSpecialty { .. }
            | SleftError::SessionNotFound { .. } => ErrorCategory::Input,
            SleftError::ConfigError { .. }
            | SleftError::ConfigValidationError { .. }
            | SleftError::InvalidConfigValueError { .. }
            | SleftError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SleftError::HttpError(_) | SleftError::ExternalServiceError { .. } => {
                ErrorCategory::External
            }
            SleftError::CsvError(_)
            | SleftError::IoError(_)
            | SleftError::SerializationError(_)
            | SleftError::ProcessingError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::External => ErrorSeverity::Medium,
            ErrorCategory::Internal => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// True for errors caused by the caller's input; these map to 4xx.
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    /// Message safe to show to an end user. Internal details stay in the logs.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => self.to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::External => "An external service is unavailable".to_string(),
            ErrorCategory::Internal => "Internal server error".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SleftError::UnknownSpecialty { .. } => {
                "Use one of the specialties listed by `sleft specialties`"
            }
            SleftError::ValidationError { .. } => "Check the request fields and try again",
            SleftError::SessionNotFound { .. } => "The session expired; start a new one",
            SleftError::MissingConfigError { .. } | SleftError::ConfigError { .. } => {
                "Check the configuration file and required environment variables"
            }
            SleftError::ConfigValidationError { .. }
            | SleftError::InvalidConfigValueError { .. } => {
                "Fix the reported configuration value"
            }
            SleftError::HttpError(_) | SleftError::ExternalServiceError { .. } => {
                "Check network connectivity and API credentials"
            }
            SleftError::IoError(_) => "Check file paths and permissions",
            SleftError::CsvError(_)
            | SleftError::SerializationError(_)
            | SleftError::ProcessingError { .. } => "Re-run with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, SleftError>;
