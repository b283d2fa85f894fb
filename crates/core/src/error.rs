//! Unified error types for the tracker.
//!
//! - `Validation`: missing or malformed input, reported before any write (400)
//! - `Storage`: record store read/write failure, message passed through (500)
//! - `AggregationPartialFailure`: one stats slice failed (500 if surfaced)
//! - `Internal`: a blocking storage task panicked or was cancelled (500)

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the tracker.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidBody(String),

    /// Underlying storage message, passed through verbatim.
    #[error("{0}")]
    Storage(String),

    #[error("stats query '{slice}' failed: {message}")]
    AggregationPartialFailure { slice: &'static str, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn partial(slice: &'static str, source: &Error) -> Self {
        Self::AggregationPartialFailure {
            slice,
            message: source.to_string(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InvalidBody(_) => 400,
            Self::Storage(_) => 500,
            Self::AggregationPartialFailure { .. } => 500,
            Self::Internal(_) => 500,
        }
    }

}
