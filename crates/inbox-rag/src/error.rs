//! Error types for the email assistant core

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Assistant errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing credentials, bad settings). Fatal, never retried.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A budgeted operation exceeded its deadline
    #[error("{what} took too long")]
    Timeout { what: String },

    /// An upstream service could not be reached
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Document store error
    #[error("Email store error: {0}")]
    Store(String),

    /// Vector index error
    #[error("Vector index error: {0}")]
    Index(String),

    /// Language model error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Ingestion failure (partial progress is retained)
    #[error("Failed to process emails: {0}")]
    Ingestion(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a timeout error for the named operation
    pub fn timeout(what: impl Into<String>) -> Self {
        Self::Timeout { what: what.into() }
    }

    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create a vector index error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// True if this error is a deadline expiry
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// True if this error means an upstream service could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout {
                what: "HTTP request".to_string(),
            }
        } else if err.is_connect() {
            Error::Unavailable(err.to_string())
        } else {
            Error::Llm(err.to_string())
        }
    }
}
