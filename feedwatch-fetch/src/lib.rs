// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # feedwatch Fetch
//!
//! Network and side-channel infrastructure for `feedwatch`.
//!
//! ## Host APIs
//!
//! The [`host`] module provides abstractions for external systems:
//!
//! - [`host::http`] - HTTP client with tracing
//! - [`host::telegram`] - Telegram Bot API notification sink
//!
//! ## Hooks
//!
//! - [`notify::NotificationSink`] - Where finished reports go
//! - [`diagnostics::DiagnosticSink`] - Optional dump of decoded responses
//! - [`context::FetchContext`] - Bundles the above for platform integrations
//!
//! ## Example
//!
//! ```ignore
//! use feedwatch_fetch::{FetchContext, FileDiagnostics};
//!
//! let ctx = FetchContext::builder()
//!     .diagnostics(Arc::new(FileDiagnostics::new("/tmp/feedwatch", false)))
//!     .build()?;
//! ```

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod notify;

// Errors
pub use error::{HttpError, NotifyError};

// Host APIs
pub use host::{
    http::{join_url, sensitive_header, HttpClient},
    telegram::{TelegramConfig, TelegramSink},
};

// Hooks & context
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
pub use diagnostics::{cleanup_artifacts, DiagnosticSink, FileDiagnostics, NoopDiagnostics};
pub use notify::{NotificationSink, StdoutSink};
