//! Per-platform account configuration.
//!
//! These are loaded once at startup and never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Avito account authenticated with the client-credentials grant.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvitoAccount {
    /// Account name shown in reports.
    pub name: String,
    /// OAuth client identifier.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

impl AvitoAccount {
    /// Creates a new account.
    pub fn new(
        name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for AvitoAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvitoAccount")
            .field("name", &self.name)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Cian account with a static API token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CianAccount {
    /// Account name shown in reports.
    pub name: String,
    /// Bearer token.
    pub token: String,
}

impl CianAccount {
    /// Creates a new account.
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for CianAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CianAccount")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Yandex Realty feed, identified by its CRM feed id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YandexFeed {
    /// Account name shown in reports.
    pub name: String,
    /// CRM feed identifier.
    pub feed_id: String,
}

impl YandexFeed {
    /// Creates a new feed entry.
    pub fn new(name: impl Into<String>, feed_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feed_id: feed_id.into(),
        }
    }
}
