//! Host APIs for feedwatch platform integrations.
//!
//! - [`http`] - HTTP client with tracing
//! - [`telegram`] - Telegram Bot API notification sink

pub mod http;
pub mod telegram;

// Re-export key types
pub use http::HttpClient;
pub use telegram::{TelegramConfig, TelegramSink};
