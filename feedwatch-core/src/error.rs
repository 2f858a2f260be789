//! Core error types for `feedwatch`.

use thiserror::Error;

/// Core error type for `feedwatch` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown platform name.
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
}
