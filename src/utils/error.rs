use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("API response contained no completion text")]
    EmptyCompletionError,

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid watched date '{value}' on line {line}")]
    DateParseError { line: u64, value: String },

    #[error("Invalid rating '{value}' on line {line}")]
    RatingParseError { line: u64, value: String },

    #[error("Exemplar titles not found in dataset: {}", .titles.join(", "))]
    MissingExemplarsError { titles: Vec<String> },

    #[error("Review for '{title}' has no text to summarize")]
    MissingReviewError { title: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
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
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

/// Exit code when the run finished but some reviews were not summarized.
pub const PARTIAL_FAILURE_EXIT_CODE: i32 = 2;

impl ErrorSeverity {
    // 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl DigestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DigestError::ApiError(_)
            | DigestError::ApiStatusError { .. }
            | DigestError::EmptyCompletionError => ErrorCategory::Network,
            DigestError::CsvError(_)
            | DigestError::SerializationError(_)
            | DigestError::DateParseError { .. }
            | DigestError::RatingParseError { .. }
            | DigestError::MissingExemplarsError { .. }
            | DigestError::MissingReviewError { .. } => ErrorCategory::Data,
            DigestError::ConfigError { .. }
            | DigestError::ConfigValidationError { .. }
            | DigestError::InvalidConfigValueError { .. }
            | DigestError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DigestError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether the error only affects the review currently being summarized.
    pub fn is_row_scoped(&self) -> bool {
        matches!(
            self,
            DigestError::ApiError(_)
                | DigestError::ApiStatusError { .. }
                | DigestError::EmptyCompletionError
                | DigestError::SerializationError(_)
                | DigestError::MissingReviewError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DigestError::ApiError(_) => {
                "Check your network connection and the configured API base URL".to_string()
            }
            DigestError::ApiStatusError { status: 401, .. } => {
                "Check that OPENAI_API_KEY holds a valid key".to_string()
            }
            DigestError::ApiStatusError { status: 429, .. } => {
                "The API rate limit or quota was hit; wait and run again".to_string()
            }
            DigestError::ApiStatusError { .. } | DigestError::EmptyCompletionError => {
                "Run again later, or try a different model".to_string()
            }
            DigestError::CsvError(_) => {
                "Make sure the file is the reviews.csv from a Letterboxd export".to_string()
            }
            DigestError::IoError(_) => {
                "Check that the reviews file exists and is readable".to_string()
            }
            DigestError::SerializationError(_) => {
                "The API response was not in the expected format".to_string()
            }
            DigestError::DateParseError { .. } => {
                "Watched dates must look like YYYY-MM-DD".to_string()
            }
            DigestError::RatingParseError { .. } => {
                "Ratings must be numbers between 0.5 and 5.0, or empty".to_string()
            }
            DigestError::MissingExemplarsError { .. } => {
                "Add the reviews to your Letterboxd export or list other exemplars in the config \
                 file"
                    .to_string()
            }
            DigestError::MissingReviewError { .. } => {
                "Write a review for this movie on Letterboxd and export again".to_string()
            }
            DigestError::ConfigError { .. }
            | DigestError::ConfigValidationError { .. }
            | DigestError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
            DigestError::MissingConfigError { field } => {
                format!("Set {} in the environment or in a .env file", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not get a summary: {}", self),
            ErrorCategory::Data => format!("Could not read the reviews: {}", self),
            ErrorCategory::Configuration => format!("Invalid setup: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
