use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unsupported file: {filename}")]
    UnsupportedFile { filename: String },

    #[error("Invalid file content")]
    InvalidFileContent,

    #[error("Backend responded with {status}: {message}")]
    BackendError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ApiError(_) | AppError::BackendError { .. } => ErrorCategory::Network,
            AppError::CsvError(_) | AppError::SerializationError(_) => ErrorCategory::Data,
            AppError::ConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AppError::ValidationError { .. }
            | AppError::UnsupportedFile { .. }
            | AppError::InvalidFileContent => ErrorCategory::Input,
            AppError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::ValidationError { .. }
            | AppError::UnsupportedFile { .. }
            | AppError::InvalidFileContent => ErrorSeverity::Low,
            AppError::ApiError(_) | AppError::BackendError { .. } => ErrorSeverity::Medium,
            AppError::CsvError(_) | AppError::SerializationError(_) => ErrorSeverity::High,
            AppError::ConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. }
            | AppError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the backend service is reachable and retry",
            ErrorCategory::Data => "Inspect the input data for malformed content",
            ErrorCategory::Configuration => "Review the command line flags and the TOML config file",
            ErrorCategory::Input => "Select a readable .csv file and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::UnsupportedFile { .. } => "Please select a .csv file".to_string(),
            AppError::InvalidFileContent => "Parsing failed".to_string(),
            AppError::BackendError { message, .. } => message.clone(),
            AppError::ApiError(_) => "Could not reach the backend service".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
