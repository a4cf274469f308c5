use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegisterError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Data file not found: {path}")]
    DataFileMissing { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid selection '{input}': expected a number between 1 and {max}")]
    InvalidSelection { input: String, max: usize },

    #[error("No student with email {email}")]
    StudentNotFound { email: String },

    #[error("A student with email {email} already exists")]
    DuplicateStudent { email: String },

    #[error("Already enrolled in {course}")]
    AlreadyEnrolled { course: String },

    #[error("Not enrolled in {course}")]
    NotEnrolled { course: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Operator-facing classes of failure. None of them is fatal to the menu loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    LookupMiss,
    Io,
    Internal,
}

impl RegisterError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. }
            | Self::InvalidSelection { .. }
            | Self::DuplicateStudent { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigError { .. } => ErrorCategory::Validation,
            Self::StudentNotFound { .. }
            | Self::AlreadyEnrolled { .. }
            | Self::NotEnrolled { .. } => ErrorCategory::LookupMiss,
            Self::IoError(_) | Self::CsvError(_) | Self::DataFileMissing { .. } => {
                ErrorCategory::Io
            }
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Text shown to the operator after an aborted operation.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::InvalidSelection { .. } => "Invalid selection.".to_string(),
            Self::StudentNotFound { .. } => "No student found with that email.".to_string(),
            Self::DuplicateStudent { email } => {
                format!("A student with email {} already exists.", email)
            }
            Self::AlreadyEnrolled { .. } => "Already enrolled in this course.".to_string(),
            Self::NotEnrolled { .. } => "Not enrolled in this course.".to_string(),
            Self::DataFileMissing { path } => format!("File {} does not exist.", path),
            Self::IoError(e) => format!("File error: {}", e),
            Self::CsvError(e) => format!("File error: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegisterError>;
