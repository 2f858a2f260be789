//! Avito autoload report API client.

use std::sync::Arc;

use feedwatch_core::AccessCredential;
use feedwatch_fetch::HttpClient;
use reqwest::Response;
use tracing::{debug, instrument};

use super::error::AvitoError;

/// Default last-completed-report endpoint.
pub const AVITO_REPORT_URL: &str =
    "https://api.avito.ru/autoload/v3/reports/last_completed_report";

/// Avito report API client.
#[derive(Debug, Clone)]
pub struct AvitoApiClient {
    http: Arc<HttpClient>,
    report_url: String,
}

impl AvitoApiClient {
    /// Creates a client for `report_url`.
    pub fn new(http: Arc<HttpClient>, report_url: impl Into<String>) -> Self {
        Self {
            http,
            report_url: report_url.into(),
        }
    }

    /// Requests the last completed autoload report.
    ///
    /// Returns the raw response: the caller inspects the status (403 means
    /// the token was rejected) before reading the body.
    #[instrument(skip(self, credential))]
    pub async fn last_completed_report(
        &self,
        credential: &AccessCredential,
    ) -> Result<Response, AvitoError> {
        let response = self
            .http
            .get_with_auth(&self.report_url, &credential.bearer())
            .await?;
        debug!(status = %response.status(), "Avito report response");
        Ok(response)
    }
}
