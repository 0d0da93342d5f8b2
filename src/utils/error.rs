use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Carousel requires at least one item")]
    EmptyCarousel,

    #[error("Index {index} out of range for carousel of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Validation error on '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Form submission failed: {message}")]
    SubmissionError { message: String },

    #[error("Async runtime unavailable: {message}")]
    RuntimeUnavailable { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Precondition,
    UserInput,
    Configuration,
    External,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        SiteError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::EmptyCarousel | SiteError::IndexOutOfRange { .. } => {
                ErrorCategory::Precondition
            }
            SiteError::ValidationError { .. } => ErrorCategory::UserInput,
            SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SiteError::SubmissionError { .. } => ErrorCategory::External,
            SiteError::IoError(_) | SiteError::RuntimeUnavailable { .. } => ErrorCategory::System,
        }
    }

    /// 錯誤嚴重程度，CLI 依此決定退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 最壞情況只是畫面不一致
            ErrorCategory::UserInput => ErrorSeverity::Low,
            ErrorCategory::Precondition | ErrorCategory::External => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SiteError::EmptyCarousel => "Provide at least one review card".to_string(),
            SiteError::IndexOutOfRange { len, .. } => {
                format!("Use an index between 0 and {}", len.saturating_sub(1))
            }
            SiteError::ValidationError { field, .. } => {
                format!("Correct the '{}' field and submit again", field)
            }
            SiteError::ConfigValidationError { field, .. }
            | SiteError::InvalidConfigValueError { field, .. } => {
                format!("Check the '{}' entry in your configuration file", field)
            }
            SiteError::MissingConfigError { field } => {
                format!("Add '{}' to your configuration", field)
            }
            SiteError::SubmissionError { .. } => "Try submitting the form again later".to_string(),
            SiteError::RuntimeUnavailable { .. } => {
                "Run inside a tokio runtime or use the virtual clock".to_string()
            }
            SiteError::IoError(_) => "Check file paths and permissions".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::ValidationError { message, .. } => message.clone(),
            SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
