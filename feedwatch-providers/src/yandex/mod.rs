//! Yandex Realty integration.
//!
//! All feeds share one OAuth token. Each feed's state lists its errors.

mod api;
mod error;
mod fetcher;
pub(crate) mod parser;

pub use api::{YandexApiClient, YANDEX_API_BASE};
pub use error::YandexError;
pub use fetcher::YandexFeedFetcher;
