//! Per-account status lines.
//!
//! A [`StatusLine`] is the only thing a platform pass produces for an
//! account: success, problems with counts, or a failure reason. Its
//! `Display` output is the Markdown line posted to the report channel.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::platform::Platform;

/// Marker for an account with no problems.
pub const SUCCESS_MARKER: &str = "✅";
/// Marker for an account whose feed has errors or warnings.
pub const PROBLEM_MARKER: &str = "🚫";
/// Marker for an account that could not be checked.
pub const FAILURE_MARKER: &str = "❌";
/// Marker preceding a warning count.
pub const WARNING_MARKER: &str = "⚠️";

// ============================================================================
// Failure Kind
// ============================================================================

/// Why an account could not be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Initial token issuance failed.
    TokenIssue,
    /// Forced re-issuance after an authorization rejection failed.
    TokenRefresh,
    /// The request could not be built.
    BuildRequest,
    /// Transport failure.
    Request,
    /// Transport failure on the retry after a token refresh.
    RequestAfterRefresh,
    /// The response body could not be read.
    ReadResponse,
    /// The response body was not a JSON object.
    ParseJson,
    /// The platform answered with a non-success status.
    HttpStatus(u16),
}

impl FailureKind {
    /// Human-readable reason.
    pub fn describe(&self) -> String {
        match self {
            Self::TokenIssue => "token issue error".to_string(),
            Self::TokenRefresh => "token refresh error".to_string(),
            Self::BuildRequest => "request build error".to_string(),
            Self::Request => "request execution error".to_string(),
            Self::RequestAfterRefresh => "request failed after token refresh".to_string(),
            Self::ReadResponse => "response read error".to_string(),
            Self::ParseJson => "JSON parse error".to_string(),
            Self::HttpStatus(code) => format!("data fetch error (code {code})"),
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// ============================================================================
// Status Outcome
// ============================================================================

/// Classified result for one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StatusOutcome {
    /// No errors (and no warnings where tracked).
    Clean,
    /// The feed has problems.
    Problems {
        /// Number of error entries.
        errors: usize,
        /// Number of warning entries (always 0 where not tracked).
        warnings: usize,
    },
    /// The account could not be checked.
    Failed {
        /// Failure reason.
        reason: FailureKind,
    },
}

impl StatusOutcome {
    /// Classifies raw counts.
    pub fn from_counts(errors: usize, warnings: usize) -> Self {
        if errors == 0 && warnings == 0 {
            Self::Clean
        } else {
            Self::Problems { errors, warnings }
        }
    }
}

// ============================================================================
// Status Line
// ============================================================================

/// One account's outcome for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    /// Platform that was checked.
    pub platform: Platform,
    /// Account name as configured.
    pub account: String,
    /// Classified outcome.
    pub outcome: StatusOutcome,
}

impl StatusLine {
    /// Creates a status line from raw counts.
    pub fn classify(
        platform: Platform,
        account: impl Into<String>,
        errors: usize,
        warnings: usize,
    ) -> Self {
        Self {
            platform,
            account: account.into(),
            outcome: StatusOutcome::from_counts(errors, warnings),
        }
    }

    /// Creates a failed status line.
    pub fn failed(platform: Platform, account: impl Into<String>, reason: FailureKind) -> Self {
        Self {
            platform,
            account: account.into(),
            outcome: StatusOutcome::Failed { reason },
        }
    }

    /// Returns true if the account was checked and has no problems.
    pub fn is_clean(&self) -> bool {
        self.outcome == StatusOutcome::Clean
    }

    /// Returns the failure reason, if any.
    pub fn failure(&self) -> Option<FailureKind> {
        match self.outcome {
            StatusOutcome::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    fn problem_summary(&self, errors: usize, warnings: usize) -> String {
        if !self.platform.tracks_warnings() {
            return format!("found {errors} errors");
        }

        let mut parts = Vec::with_capacity(2);
        if errors > 0 {
            parts.push(format!("{PROBLEM_MARKER} {errors} errors"));
        }
        if warnings > 0 {
            parts.push(format!("{WARNING_MARKER} {warnings} warnings"));
        }
        parts.join(", ")
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("*{} {}*", self.platform.display_name(), self.account);
        match self.outcome {
            StatusOutcome::Clean => {
                let summary = if self.platform.tracks_warnings() {
                    "no errors or warnings found"
                } else {
                    "no errors found"
                };
                write!(f, "{SUCCESS_MARKER} {title}: {summary}")
            }
            StatusOutcome::Problems { errors, warnings } => {
                let summary = self.problem_summary(errors, warnings);
                write!(f, "{PROBLEM_MARKER} {title}: {summary}")
            }
            StatusOutcome::Failed { reason } => write!(f, "{FAILURE_MARKER} {title}: {reason}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
