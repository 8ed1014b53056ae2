//! Error types for the gear inventory

use thiserror::Error;

/// Image size ceiling accepted by the upload adapter (10 MB)
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A required identity field is missing, or an editor received a value it cannot hold
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Failed to upload equipment images: File must be an image: {name} ({content_type})")]
    InvalidType { name: String, content_type: String },

    #[error("Failed to upload equipment images: Image file size must not exceed {limit} bytes: {name} is {size} bytes")]
    SizeLimit { name: String, size: u64, limit: u64 },

    #[error("Failed to upload equipment images: {0}")]
    Upload(#[source] StoreError),

    /// Document store fault; `stage` is `submit`, `get` or `update`
    #[error("Failed to {stage} equipment inventory: {source}")]
    Persist {
        stage: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("A submission is already in progress")]
    Busy,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid form draft: {0}")]
    Draft(String),
}

impl AppError {
    /// Whether this error was raised before any store was contacted
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidType { .. }
                | AppError::SizeLimit { .. }
                | AppError::Busy
                | AppError::Config(_)
                | AppError::Draft(_)
        )
    }
}

/// Fault reported by an object store or document store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document {0} not found")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
