use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormsError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Store rejected request ({status}): {message}")]
    StoreRejected {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("No {table} row found for {key}")]
    NotFound { table: String, key: String },

    #[error("Expected {expected} row(s) from {table}, got {actual}")]
    UnexpectedRowCount {
        table: String,
        expected: &'static str,
        actual: usize,
    },

    #[error("Business {business_id} has already been claimed")]
    ClaimConflict { business_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Validation,
    Persistence,
    Conflict,
}

impl FormsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormsError::ApiError(_) => ErrorCategory::Network,
            FormsError::UrlError(_)
            | FormsError::IoError(_)
            | FormsError::ConfigError { .. }
            | FormsError::MissingConfigError { .. }
            | FormsError::InvalidConfigValueError { .. }
            | FormsError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            FormsError::ValidationError { .. } => ErrorCategory::Validation,
            FormsError::SerializationError(_)
            | FormsError::StoreRejected { .. }
            | FormsError::NotFound { .. }
            | FormsError::UnexpectedRowCount { .. } => ErrorCategory::Persistence,
            FormsError::ClaimConflict { .. } => ErrorCategory::Conflict,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Conflict => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Persistence => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 顯示給終端使用者的訊息 (表單上的 submit 錯誤也用這個)
    pub fn user_friendly_message(&self) -> String {
        match self {
            FormsError::ApiError(_) => {
                "Could not reach the server. Please check your connection.".to_string()
            }
            FormsError::StoreRejected { message, .. } => message.clone(),
            FormsError::NotFound { .. } => "The record you are editing no longer exists.".to_string(),
            FormsError::ClaimConflict { .. } => {
                "This business has already been claimed.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Retry once the network connection is available",
            ErrorCategory::Configuration => {
                "Check the store URL and API key in the config file or SUPABASE_* variables"
            }
            ErrorCategory::Validation => "Fill in every required field and submit again",
            ErrorCategory::Persistence => "Review the submitted values and try again",
            ErrorCategory::Conflict => "Contact support if you believe you own this business",
        }
    }
}

pub type Result<T> = std::result::Result<T, FormsError>;
