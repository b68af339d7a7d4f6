use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfitError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Price request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Price endpoint {url} returned HTTP {status}")]
    HttpStatusError { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid data in {source_name}: {message}")]
    DataError {
        source_name: String,
        message: String,
    },

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

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    Io,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ProfitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProfitError::ConfigValidationError { .. }
            | ProfitError::InvalidConfigValueError { .. }
            | ProfitError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ProfitError::ApiError(_) | ProfitError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            ProfitError::SerializationError(_) | ProfitError::DataError { .. } => {
                ErrorCategory::Data
            }
            ProfitError::IoError(_) | ProfitError::ZipError(_) => ErrorCategory::Io,
            ProfitError::CsvError(_) | ProfitError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data | ErrorCategory::Processing => {
                ErrorSeverity::High
            }
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ProfitError::ApiError(_) | ProfitError::HttpStatusError { .. } => {
                "Check your network connection and the price endpoint, or point --prices at a local prices.json"
            }
            ProfitError::IoError(_) => {
                "Make sure crops.json, fruits.json and prices.json exist in the data directory and the output path is writable"
            }
            ProfitError::SerializationError(_) | ProfitError::DataError { .. } => {
                "Re-download prices.json with download_prices and check the seed definition files are valid JSON arrays"
            }
            ProfitError::ConfigValidationError { .. }
            | ProfitError::InvalidConfigValueError { .. }
            | ProfitError::MissingConfigError { .. } => {
                "Review the command-line flags or the TOML configuration file"
            }
            ProfitError::ZipError(_) => "Disable compression or free up disk space",
            ProfitError::CsvError(_) | ProfitError::ProcessingError { .. } => {
                "Run again with --verbose for details"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Network => format!("Could not fetch market prices: {}", self),
            ErrorCategory::Data => format!("Input data could not be read: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Processing => format!("Could not build the report: {}", self),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfitError>;
