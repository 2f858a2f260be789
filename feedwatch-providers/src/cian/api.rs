//! Cian public API client.

use std::sync::Arc;

use feedwatch_fetch::HttpClient;
use reqwest::StatusCode;
use tracing::{debug, instrument, warn};

use super::error::CianError;
use crate::body::{read_object, JsonObject};

/// Default last-order-info endpoint.
pub const CIAN_REPORT_URL: &str = "https://public-api.cian.ru/v1/get-last-order-info";

/// Cian API client.
#[derive(Debug, Clone)]
pub struct CianApiClient {
    http: Arc<HttpClient>,
    report_url: String,
}

impl CianApiClient {
    /// Creates a client for `report_url`.
    pub fn new(http: Arc<HttpClient>, report_url: impl Into<String>) -> Self {
        Self {
            http,
            report_url: report_url.into(),
        }
    }

    /// Fetches the last order report.
    ///
    /// The body is decoded before the status is checked, so a non-JSON
    /// error page is a parse failure rather than a status failure.
    #[instrument(skip(self, token))]
    pub async fn last_order_info(&self, token: &str) -> Result<JsonObject, CianError> {
        let response = self
            .http
            .get_with_auth(&self.report_url, &format!("Bearer {token}"))
            .await?;

        let status = response.status();
        let body = read_object(response).await?;

        if status != StatusCode::OK {
            warn!(status = %status, "Cian answered with an error status");
            return Err(CianError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Cian report decoded");
        Ok(body)
    }
}
