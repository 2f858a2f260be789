//! Yandex-specific errors.

use feedwatch_core::FailureKind;
use feedwatch_fetch::HttpError;
use thiserror::Error;

use crate::body::{JsonObject, ResponseError};

/// Yandex-specific errors.
#[derive(Debug, Error)]
pub enum YandexError {
    /// HTTP request failed or could not be built.
    #[error("HTTP request failed: {0}")]
    Http(#[from] HttpError),

    /// The body could not be read or decoded.
    #[error(transparent)]
    Body(#[from] ResponseError),

    /// The API answered with a non-200 status.
    #[error("Unexpected status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Decoded response body.
        body: JsonObject,
    },
}

impl YandexError {
    /// Report classification for this failure.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Http(HttpError::InvalidUrl(_) | HttpError::InvalidHeader(_)) => {
                FailureKind::BuildRequest
            }
            Self::Http(HttpError::Request(_)) => FailureKind::Request,
            Self::Body(e) => e.failure_kind(),
            Self::Status { status, .. } => FailureKind::HttpStatus(*status),
        }
    }
}
