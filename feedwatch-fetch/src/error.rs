//! Fetch error types.

use thiserror::Error;

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid header value.
    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),
}

// ============================================================================
// Notify Error
// ============================================================================

/// Error type for notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP layer failure.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The messaging API rejected the call.
    #[error("Rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The file to upload could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink is missing required settings.
    #[error("Sink not configured: {0}")]
    NotConfigured(&'static str),
}
