//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("failed to fetch content from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("invalid source: {0}")]
    InvalidSource(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("serialize tree: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
