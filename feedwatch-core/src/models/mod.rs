//! Domain models for `feedwatch`.
//!
//! - [`platform`] - Monitored listing platforms
//! - [`account`] - Per-platform account configuration
//! - [`status`] - Per-account status lines
//! - [`report`] - Dated report assembled from status lines

pub mod account;
pub mod platform;
pub mod report;
pub mod status;

pub use account::{AvitoAccount, CianAccount, YandexFeed};
pub use platform::Platform;
pub use report::Report;
pub use status::{FailureKind, StatusLine, StatusOutcome};
