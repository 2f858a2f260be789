//! Yandex Realty CRM API client.

use std::sync::Arc;

use feedwatch_fetch::{join_url, sensitive_header, HttpClient};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::{debug, instrument, warn};

use super::error::YandexError;
use crate::body::{read_object, JsonObject};

/// Default API base URL.
pub const YANDEX_API_BASE: &str = "https://api.realty.yandex.net/2.0";

/// Second authorization header required by the CRM API.
const X_AUTHORIZATION: HeaderName = HeaderName::from_static("x-authorization");

/// Yandex Realty API client.
#[derive(Clone)]
pub struct YandexApiClient {
    http: Arc<HttpClient>,
    api_base: String,
    oauth_token: String,
    x_authorization: String,
}

impl YandexApiClient {
    /// Creates a client.
    pub fn new(
        http: Arc<HttpClient>,
        api_base: impl Into<String>,
        oauth_token: impl Into<String>,
        x_authorization: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            oauth_token: oauth_token.into(),
            x_authorization: x_authorization.into(),
        }
    }

    fn build_headers(&self) -> Result<HeaderMap, YandexError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            sensitive_header("authorization", &format!("OAuth {}", self.oauth_token))?,
        );
        if !self.x_authorization.is_empty() {
            headers.insert(
                X_AUTHORIZATION,
                sensitive_header("x-authorization", &self.x_authorization)?,
            );
        }
        Ok(headers)
    }

    /// Fetches the state of one feed.
    #[instrument(skip(self))]
    pub async fn feed_state(&self, feed_id: &str) -> Result<JsonObject, YandexError> {
        let url = join_url(&self.api_base, &format!("crm/feed/{feed_id}/state"))?;
        let headers = self.build_headers()?;

        let response = self.http.get_with_headers(&url, headers).await?;
        let status = response.status();
        let body = read_object(response).await?;

        if status != StatusCode::OK {
            warn!(status = %status, "Yandex answered with an error status");
            return Err(YandexError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Yandex feed state decoded");
        Ok(body)
    }
}

impl std::fmt::Debug for YandexApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YandexApiClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}
