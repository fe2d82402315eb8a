//! Typed errors for the spot seeking pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum SeekError {
    /// An external service answered with a non-success or unexpected status.
    ///
    /// Carries the raw response body (or application status) for diagnosis.
    #[error("upstream service error: {body}")]
    Upstream { body: String },

    /// HTTP transport failure talking to an external service.
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The text-generation service failed or produced unusable output.
    #[error("generation error: {0}")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A fetched payload did not match the expected shape.
    #[error("validation error: {0}")]
    Validation(#[from] serde_json::Error),

    /// Configuration error, typically a missing environment variable.
    #[error("config error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SeekError {
    /// Build an `Upstream` error from a response body or status line.
    pub fn upstream(body: impl Into<String>) -> Self {
        Self::Upstream { body: body.into() }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, SeekError>;
