//! Trait definitions for `feedwatch`.

use std::future::Future;

use crate::models::{Platform, StatusLine};

/// A platform integration that produces one status line per account.
///
/// Implementors must never fail as a whole: every per-account problem is
/// folded into that account's [`StatusLine`], and the returned lines follow
/// account configuration order.
pub trait StatusCollector: Send + Sync {
    /// Platform this collector checks.
    fn platform(&self) -> Platform;

    /// Checks every configured account sequentially.
    fn collect(&self) -> impl Future<Output = Vec<StatusLine>> + Send;
}
