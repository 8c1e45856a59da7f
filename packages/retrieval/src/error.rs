//! Typed errors for the retrieval library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Transport failures are fatal
//! to an orchestrated request; empty source results are not errors and are
//! represented as empty collections by the callers.

use thiserror::Error;

/// Errors that can occur during retrieval operations.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// HTTP transport failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An upstream service answered with a non-success status
    #[error("{service} returned HTTP {status}")]
    UpstreamStatus {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    /// The embedding backend reported a read-path failure
    #[error("embedding backend error: {0}")]
    Backend(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Tokenizer vocabulary could not be loaded
    #[error("tokenizer error: {0}")]
    Tokenizer(String),
}

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;
