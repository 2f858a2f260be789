//! Cian per-account status pass.

use std::sync::Arc;

use feedwatch_core::{account_key, CianAccount, Platform, StatusCollector, StatusLine};
use feedwatch_fetch::{DiagnosticSink, FetchContext};
use feedwatch_store::CianSettings;
use serde_json::Value;
use tracing::{error, info, instrument};

use super::api::CianApiClient;
use super::error::CianError;
use super::parser::{
    extract_offers, filter_offers_by_key, offers_to_value, ERRORS_KEY, WARNINGS_KEY,
};

/// Checks every configured Cian account.
pub struct CianStatusFetcher {
    accounts: Vec<CianAccount>,
    api: CianApiClient,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl CianStatusFetcher {
    /// Creates a fetcher from its parts.
    pub fn new(
        accounts: Vec<CianAccount>,
        api: CianApiClient,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            accounts,
            api,
            diagnostics,
        }
    }

    /// Creates a fetcher from configuration and a fetch context.
    pub fn from_settings(settings: &CianSettings, ctx: &FetchContext) -> Self {
        Self::new(
            settings.accounts.clone(),
            CianApiClient::new(Arc::clone(&ctx.http), settings.report_url.clone()),
            Arc::clone(&ctx.diagnostics),
        )
    }

    /// Checks one account.
    #[instrument(skip(self, account), fields(account = %account.name))]
    pub async fn check_account(&self, account: &CianAccount) -> StatusLine {
        let key = account_key(&account.name);

        let report = match self.api.last_order_info(&account.token).await {
            Ok(report) => report,
            Err(e) => {
                error!(error = %e, "Cian check failed");
                if let CianError::Status { body, .. } = &e {
                    self.diagnostics
                        .record(&format!("{key}_cian_response"), &Value::Object(body.clone()));
                }
                return StatusLine::failed(
                    Platform::Cian,
                    account.name.clone(),
                    e.failure_kind(),
                );
            }
        };

        let offers = extract_offers(&report);
        let errors = filter_offers_by_key(&offers, ERRORS_KEY);
        let warnings = filter_offers_by_key(&offers, WARNINGS_KEY);

        if !errors.is_empty() {
            self.diagnostics
                .record(&format!("{key}_cian_errors"), &offers_to_value(&errors));
        }
        if !warnings.is_empty() {
            self.diagnostics
                .record(&format!("{key}_cian_warnings"), &offers_to_value(&warnings));
        }

        info!(
            offers = offers.len(),
            errors = errors.len(),
            warnings = warnings.len(),
            "Cian report checked"
        );
        let line = StatusLine::classify(
            Platform::Cian,
            account.name.clone(),
            errors.len(),
            warnings.len(),
        );

        self.diagnostics
            .record(&format!("{key}_cian_response"), &Value::Object(report));
        line
    }
}

impl std::fmt::Debug for CianStatusFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CianStatusFetcher")
            .field("accounts", &self.accounts)
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl StatusCollector for CianStatusFetcher {
    fn platform(&self) -> Platform {
        Platform::Cian
    }

    async fn collect(&self) -> Vec<StatusLine> {
        let mut lines = Vec::with_capacity(self.accounts.len());
        for account in &self.accounts {
            lines.push(self.check_account(account).await);
        }
        lines
    }
}
