//! Cian integration.
//!
//! Each account has a static bearer token. The last order report lists
//! offers; offers with a non-empty `errors` or `warnings` array are counted.

mod api;
mod error;
mod fetcher;
pub(crate) mod parser;

pub use api::{CianApiClient, CIAN_REPORT_URL};
pub use error::CianError;
pub use fetcher::CianStatusFetcher;
