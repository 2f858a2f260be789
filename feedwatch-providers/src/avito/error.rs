//! Avito-specific errors.

use feedwatch_core::FailureKind;
use feedwatch_fetch::HttpError;
use thiserror::Error;

use crate::body::ResponseError;

/// Avito-specific errors.
#[derive(Debug, Error)]
pub enum AvitoError {
    /// HTTP request failed or could not be built.
    #[error("HTTP request failed: {0}")]
    Http(#[from] HttpError),

    /// The token endpoint answered with a non-success status.
    #[error("Token request failed with status {status}: {body}")]
    TokenStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The token endpoint answered with something other than a JSON object.
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    /// The token response carries no usable `access_token`.
    #[error("access_token not found in token response")]
    MissingAccessToken,

    /// The report body could not be read or decoded.
    #[error(transparent)]
    Body(#[from] ResponseError),
}

impl AvitoError {
    /// Report classification for a failure of the report request itself.
    pub fn request_failure(&self) -> FailureKind {
        match self {
            Self::Http(HttpError::InvalidUrl(_) | HttpError::InvalidHeader(_)) => {
                FailureKind::BuildRequest
            }
            Self::Body(e) => e.failure_kind(),
            _ => FailureKind::Request,
        }
    }
}
