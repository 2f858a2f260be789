// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `feedwatch` Core
//!
//! Core types, models, and traits shared by all `feedwatch` crates.
//!
//! ## Key Types
//!
//! ### Platforms & Accounts
//! - [`Platform`] - The listing platforms whose feeds are monitored
//! - [`AvitoAccount`], [`CianAccount`], [`YandexFeed`] - Per-account configuration
//!
//! ### Credentials
//! - [`AccessCredential`] - Short-lived bearer token with an expiry
//! - [`account_key`] - Normalized account identifier used for file names
//!
//! ### Reporting
//! - [`StatusLine`] - One account's outcome for one platform
//! - [`StatusOutcome`] / [`FailureKind`] - Classification of that outcome
//! - [`Report`] - Dated header plus ordered status lines

pub mod credential;
pub mod error;
pub mod models;
pub mod traits;

pub use credential::{account_key, AccessCredential, CREDENTIAL_VALIDITY_HOURS};
pub use error::CoreError;

pub use models::{
    // Accounts
    AvitoAccount,
    CianAccount,
    YandexFeed,
    // Platforms
    Platform,
    // Reporting
    FailureKind,
    Report,
    StatusLine,
    StatusOutcome,
};

pub use traits::StatusCollector;
