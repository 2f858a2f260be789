// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # feedwatch Providers
//!
//! Listing platform integrations for `feedwatch`.
//!
//! Each platform module contains:
//!
//! - **Api**: the authenticated report request
//! - **Parser**: problem extraction from the decoded body
//! - **Fetcher**: the per-account pass, implementing
//!   [`feedwatch_core::StatusCollector`]
//!
//! ## Supported Platforms
//!
//! | Platform | Auth | Reissue on 403 | Counts |
//! |----------|------|----------------|--------|
//! | Avito | client credentials, cached 23h | ✅ once | errors |
//! | Cian | static bearer token | ❌ | errors, warnings |
//! | Yandex Realty | shared OAuth token | ❌ | errors |
//!
//! ## Usage
//!
//! ```ignore
//! use feedwatch_providers::{AvitoReportFetcher, Reporter};
//!
//! let fetcher = AvitoReportFetcher::from_settings(&config.avito, &ctx, store);
//! let report = Reporter::new(sink).run(&fetcher, today()).await;
//! ```

mod body;

pub mod avito;
pub mod cian;
pub mod report;
pub mod yandex;


pub use body::ResponseError;

pub use avito::{AvitoApiClient, AvitoError, AvitoReportFetcher, AvitoTokenIssuer};
pub use cian::{CianApiClient, CianError, CianStatusFetcher};
pub use report::{today, Reporter};
pub use yandex::{YandexApiClient, YandexError, YandexFeedFetcher};
