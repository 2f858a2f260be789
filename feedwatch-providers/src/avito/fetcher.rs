//! Avito per-account report pass.
//!
//! Each account goes through the same steps:
//!
//! 1. Load the cached credential; issue and save a new one if it is unusable.
//! 2. Request the last completed report.
//! 3. On 403, reissue unconditionally, save, and retry exactly once. A second
//!    403 is not special: its body is parsed like any other.
//! 4. Read and decode the body, count errors.
//!
//! Every failure ends the pass for that account with a failed status line.

use std::sync::Arc;

use feedwatch_core::{
    account_key, AccessCredential, AvitoAccount, FailureKind, Platform, StatusCollector,
    StatusLine,
};
use feedwatch_fetch::{DiagnosticSink, FetchContext};
use feedwatch_store::{AvitoSettings, CredentialStore};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use super::api::AvitoApiClient;
use super::error::AvitoError;
use super::issuer::AvitoTokenIssuer;
use super::parser;
use crate::body::read_object;

/// File name prefix used for Avito credential files.
pub const CREDENTIAL_PREFIX: &str = "avito";

// ============================================================================
// Fetcher
// ============================================================================

/// Checks every configured Avito account.
pub struct AvitoReportFetcher {
    accounts: Vec<AvitoAccount>,
    issuer: AvitoTokenIssuer,
    api: AvitoApiClient,
    store: Arc<dyn CredentialStore>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl AvitoReportFetcher {
    /// Creates a fetcher from its parts.
    pub fn new(
        accounts: Vec<AvitoAccount>,
        issuer: AvitoTokenIssuer,
        api: AvitoApiClient,
        store: Arc<dyn CredentialStore>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            accounts,
            issuer,
            api,
            store,
            diagnostics,
        }
    }

    /// Creates a fetcher from configuration and a fetch context.
    pub fn from_settings(
        settings: &AvitoSettings,
        ctx: &FetchContext,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self::new(
            settings.accounts.clone(),
            AvitoTokenIssuer::new(Arc::clone(&ctx.http), settings.token_url.clone()),
            AvitoApiClient::new(Arc::clone(&ctx.http), settings.report_url.clone()),
            store,
            Arc::clone(&ctx.diagnostics),
        )
    }

    /// Configured accounts, in report order.
    pub fn accounts(&self) -> &[AvitoAccount] {
        &self.accounts
    }

    /// Runs the full pass for one account.
    #[instrument(skip(self, account), fields(account = %account.name))]
    pub async fn check_account(&self, account: &AvitoAccount) -> StatusLine {
        let failed = |reason| StatusLine::failed(Platform::Avito, account.name.clone(), reason);

        // NEED_CREDENTIAL -> HAVE_CREDENTIAL
        let credential = match self.usable_credential(account).await {
            Ok(credential) => credential,
            Err(e) => {
                error!(error = %e, "Failed to obtain Avito token");
                return failed(FailureKind::TokenIssue);
            }
        };

        // REQUEST_SENT
        let response = match self.api.last_completed_report(&credential).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Avito report request failed");
                return failed(e.request_failure());
            }
        };

        // AUTH_RETRY
        let response = if response.status() == StatusCode::FORBIDDEN {
            match self.retry_after_refresh(account).await {
                Ok(response) => response,
                Err(reason) => return failed(reason),
            }
        } else {
            response
        };

        match self.classify(account, response).await {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "Failed to decode Avito report");
                failed(e.request_failure())
            }
        }
    }

    /// Returns the cached credential if usable, otherwise a freshly issued
    /// and saved one.
    async fn usable_credential(
        &self,
        account: &AvitoAccount,
    ) -> Result<AccessCredential, AvitoError> {
        let cached = self.store.load(&account.name).await;
        if cached.is_valid() {
            debug!("Using cached Avito token");
            return Ok(cached);
        }

        info!("Cached Avito token missing or expired, issuing a new one");
        self.issue_and_save(account).await
    }

    /// Issues a credential and persists it. A failed save is logged and the
    /// credential is still returned for this pass.
    async fn issue_and_save(
        &self,
        account: &AvitoAccount,
    ) -> Result<AccessCredential, AvitoError> {
        let credential = self
            .issuer
            .issue(&account.client_id, &account.client_secret)
            .await?;

        if let Err(e) = self.store.save(&account.name, &credential).await {
            warn!(error = %e, "Failed to persist Avito token");
        }
        Ok(credential)
    }

    /// Forced reissue after a 403, followed by exactly one retry.
    async fn retry_after_refresh(&self, account: &AvitoAccount) -> Result<Response, FailureKind> {
        warn!("Avito rejected the token (403), reissuing");

        let fresh = self.issue_and_save(account).await.map_err(|e| {
            error!(error = %e, "Avito token refresh failed");
            FailureKind::TokenRefresh
        })?;

        match self.api.last_completed_report(&fresh).await {
            Ok(response) => {
                if response.status() == StatusCode::FORBIDDEN {
                    warn!("Avito rejected the refreshed token as well");
                }
                Ok(response)
            }
            Err(e) => {
                error!(error = %e, "Avito report request failed after token refresh");
                Err(match e.request_failure() {
                    FailureKind::Request => FailureKind::RequestAfterRefresh,
                    other => other,
                })
            }
        }
    }

    /// Reads the report body and turns it into a status line.
    async fn classify(
        &self,
        account: &AvitoAccount,
        response: Response,
    ) -> Result<StatusLine, AvitoError> {
        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Avito answered with a non-success status, parsing body anyway");
        }

        let report = read_object(response).await?;
        let errors = parser::count_errors(&report);

        let key = account_key(&account.name);
        self.diagnostics
            .record(&format!("{key}_avito_response"), &Value::Object(report));

        info!(errors, "Avito report checked");
        Ok(StatusLine::classify(Platform::Avito, account.name.clone(), errors, 0))
    }
}

impl std::fmt::Debug for AvitoReportFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvitoReportFetcher")
            .field("accounts", &self.accounts)
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl StatusCollector for AvitoReportFetcher {
    fn platform(&self) -> Platform {
        Platform::Avito
    }

    async fn collect(&self) -> Vec<StatusLine> {
        let mut lines = Vec::with_capacity(self.accounts.len());
        for account in &self.accounts {
            lines.push(self.check_account(account).await);
        }
        lines
    }
}

// ============================================================================
// Tests
// ============================================================================
