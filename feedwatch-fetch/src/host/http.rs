//! HTTP client with tracing.
//!
//! Thin wrapper over [`reqwest::Client`] that adds request/response tracing
//! and the handful of request shapes the platform integrations need.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{multipart::Form, Client, Response};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for feedwatch.
const USER_AGENT: &str = concat!("feedwatch/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { inner: client })
    }

    /// Performs a GET request with an authorization header.
    ///
    /// The header value is validated before anything is sent.
    #[instrument(skip(self, auth_header), fields(url = %url))]
    pub async fn get_with_auth(&self, url: &str, auth_header: &str) -> Result<Response, HttpError> {
        debug!("GET request with auth");

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            sensitive_header("authorization", auth_header)?,
        );

        let response = self.inner.get(url).headers(headers).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request with custom headers.
    #[instrument(skip(self, headers), fields(url = %url))]
    pub async fn get_with_headers(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> Result<Response, HttpError> {
        debug!("GET request with headers");

        let response = self.inner.get(url).headers(headers).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a POST request with JSON body.
    #[instrument(skip(self, url, body), fields(url = %redact_path(url)))]
    pub async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, HttpError> {
        debug!("POST request with JSON");

        let response = self
            .inner
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| HttpError::Request(e.without_url()))?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a POST request with form data.
    #[instrument(skip(self, form), fields(url = %url))]
    pub async fn post_form<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        form: &T,
    ) -> Result<Response, HttpError> {
        debug!("POST request with form data");

        let response = self.inner.post(url).form(form).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a POST request with a multipart body.
    #[instrument(skip(self, url, form), fields(url = %redact_path(url)))]
    pub async fn post_multipart(&self, url: &str, form: Form) -> Result<Response, HttpError> {
        debug!("POST request with multipart form");

        let response = self
            .inner
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| HttpError::Request(e.without_url()))?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }
}

// ============================================================================
// Header helpers
// ============================================================================

/// Builds a header value marked sensitive, so it is never printed by
/// reqwest's debug output.
pub fn sensitive_header(name: &'static str, value: &str) -> Result<HeaderValue, HttpError> {
    let mut value = HeaderValue::from_str(value).map_err(|_| HttpError::InvalidHeader(name))?;
    value.set_sensitive(true);
    Ok(value)
}

// ============================================================================
// URL helpers
// ============================================================================

/// Joins `path` onto `base`, validating both.
///
/// A trailing slash on `base` is added when missing so the last segment is
/// kept, matching how endpoint bases are written in configuration.
pub fn join_url(base: &str, path: &str) -> Result<String, HttpError> {
    let mut base = Url::parse(base).map_err(|e| HttpError::InvalidUrl(format!("{base}: {e}")))?;
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    // "./" keeps a leading segment like `bot123:abc` from parsing as a scheme.
    let relative = format!("./{}", path.trim_start_matches('/'));
    let joined = base
        .join(&relative)
        .map_err(|e| HttpError::InvalidUrl(format!("{path}: {e}")))?;
    Ok(joined.to_string())
}

/// Drops the path from a URL for logging.
///
/// Bot API URLs carry the bot token in the path.
fn redact_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => format!(
            "{}://{}/…",
            parsed.scheme(),
            parsed.host_str().unwrap_or_default()
        ),
        Err(_) => "<invalid url>".to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
