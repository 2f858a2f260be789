//! Per-account access credential cache.
//!
//! Credentials are keyed by the normalized account name (see
//! [`feedwatch_core::account_key`]). A missing or unreadable record is not
//! an error: [`CredentialStore::load`] returns the zero value and the caller
//! issues a fresh credential.
//!
//! There is no locking. Each account is processed by a single pass at a
//! time, so concurrent writers to one key do not occur.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use feedwatch_core::{account_key, AccessCredential};
use tracing::{debug, instrument, warn};

use crate::error::StoreError;
use crate::persistence::{load_json, save_json};

// ============================================================================
// Trait
// ============================================================================

/// Durable key-value slot for cached access credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the cached credential for `account`.
    ///
    /// Returns [`AccessCredential::default`] when nothing usable is stored.
    async fn load(&self, account: &str) -> AccessCredential;

    /// Replaces the cached credential for `account`.
    async fn save(&self, account: &str, credential: &AccessCredential) -> Result<(), StoreError>;
}

// ============================================================================
// File-backed store
// ============================================================================

/// Stores one pretty-printed JSON file per account:
/// `<dir>/<prefix>_token_<account_key>.json`.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
    prefix: String,
}

impl FileCredentialStore {
    /// Creates a store rooted at `dir` for files named after `prefix`
    /// (the platform's CLI name).
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Directory holding the credential files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name prefix shared by every credential file of this store.
    pub fn file_prefix(&self) -> String {
        format!("{}_token_", self.prefix)
    }

    /// Path of the credential file for `account`.
    pub fn path_for(&self, account: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}.json", self.file_prefix(), account_key(account)))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    #[instrument(skip(self))]
    async fn load(&self, account: &str) -> AccessCredential {
        let path = self.path_for(account);
        match load_json::<AccessCredential>(&path).await {
            Ok(credential) => {
                debug!(path = %path.display(), "Token loaded from file");
                credential
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "No existing token file, a new token will be issued");
                AccessCredential::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to decode token file");
                AccessCredential::default()
            }
        }
    }

    #[instrument(skip(self, credential))]
    async fn save(&self, account: &str, credential: &AccessCredential) -> Result<(), StoreError> {
        let path = self.path_for(account);
        save_json(&path, credential).await?;
        debug!(path = %path.display(), "Token saved to file");
        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Credential store kept in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<String, AccessCredential>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one credential.
    pub fn with_entry(account: &str, credential: AccessCredential) -> Self {
        let store = Self::new();
        store.insert(account, credential);
        store
    }

    /// Inserts a credential without going through the async API.
    pub fn insert(&self, account: &str, credential: AccessCredential) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(account_key(account), credential);
    }

    /// Returns the stored credential, if any.
    pub fn get(&self, account: &str) -> Option<AccessCredential> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&account_key(account))
            .cloned()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self, account: &str) -> AccessCredential {
        self.get(account).unwrap_or_default()
    }

    async fn save(&self, account: &str, credential: &AccessCredential) -> Result<(), StoreError> {
        self.insert(account, credential.clone());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
