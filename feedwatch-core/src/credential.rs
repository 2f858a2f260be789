//! Access credentials and the validity guard.
//!
//! An [`AccessCredential`] is usable iff its token is non-empty and the
//! current time is strictly before its expiry. [`AccessCredential::is_valid`]
//! is the only place that decision is made.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Validity window stamped on freshly issued credentials.
///
/// Tokens live for 24 hours upstream; refreshing after 23 keeps a margin.
pub const CREDENTIAL_VALIDITY_HOURS: i64 = 23;

// ============================================================================
// Access Credential
// ============================================================================

/// Short-lived bearer token with an expiry timestamp.
///
/// The zero value (empty token, Unix epoch expiry) means "nothing cached".
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCredential {
    /// Bearer token.
    pub access_token: String,
    /// Instant after which the token must not be used.
    pub expires_at: DateTime<Utc>,
}

impl AccessCredential {
    /// Creates a credential with an explicit expiry.
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// Creates a credential issued at `issued_at`, valid for
    /// [`CREDENTIAL_VALIDITY_HOURS`].
    pub fn issued_at(access_token: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self::new(
            access_token,
            issued_at + Duration::hours(CREDENTIAL_VALIDITY_HOURS),
        )
    }

    /// Returns true if the credential can be used right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Returns true if the credential can be used at `now`.
    ///
    /// Strict: a credential is already invalid at its expiry instant.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && now < self.expires_at
    }

    /// Returns true if this is the zero value.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_empty()
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl Default for AccessCredential {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            expires_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl fmt::Debug for AccessCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.access_token.is_empty() {
            "<empty>"
        } else {
            "<redacted>"
        };
        f.debug_struct("AccessCredential")
            .field("access_token", &token)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// ============================================================================
// Account Keys
// ============================================================================

/// Normalizes an account name for use in file names.
///
/// Lowercases and replaces spaces with underscores: `"Test Co"` -> `"test_co"`.
pub fn account_key(account: &str) -> String {
    account.replace(' ', "_").to_lowercase()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_default_is_invalid() {
        let cred = AccessCredential::default();
        assert!(cred.is_empty());
        assert!(!cred.is_valid());
        assert_eq!(cred.expires_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_valid_before_expiry() {
        let cred = AccessCredential::new("tok", at(1_000));
        assert!(cred.is_valid_at(at(999)));
    }

    #[test]
    fn test_invalid_at_expiry_boundary() {
        let cred = AccessCredential::new("tok", at(1_000));
        assert!(!cred.is_valid_at(at(1_000)));
        assert!(!cred.is_valid_at(at(1_001)));
    }

    #[test]
    fn test_empty_token_never_valid() {
        let cred = AccessCredential::new("", at(i64::from(i32::MAX)));
        assert!(!cred.is_valid_at(at(0)));
    }

    #[test]
    fn test_guard_is_idempotent() {
        let cred = AccessCredential::new("tok", Utc::now() + Duration::minutes(5));
        let first = cred.is_valid();
        let second = cred.is_valid();
        assert!(first);
        assert_eq!(first, second);
    }

    #[test]
    fn test_issued_at_stamps_validity_window() {
        let now = at(10_000);
        let cred = AccessCredential::issued_at("tok", now);
        assert_eq!(cred.expires_at - now, Duration::hours(23));
        assert!(cred.is_valid_at(now));
    }

    #[test]
    fn test_debug_redacts_token() {
        let cred = AccessCredential::new("super-secret", at(5));
        let debug = format!("{cred:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_serialized_layout() {
        let cred = AccessCredential::new("abc", at(0));
        let json = serde_json::to_value(&cred).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["expires_at"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_account_key() {
        assert_eq!(account_key("Test Co"), "test_co");
        assert_eq!(account_key("ALPHA  Realty"), "alpha__realty");
        assert_eq!(account_key("plain"), "plain");
    }
}
