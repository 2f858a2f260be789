//! Avito access token issuance.
//!
//! Exchanges a client id and secret for an access token via the
//! client-credentials grant. The endpoint does not report a lifetime that
//! we trust; every token is stamped valid for
//! [`CREDENTIAL_VALIDITY_HOURS`](feedwatch_core::CREDENTIAL_VALIDITY_HOURS).

use std::sync::Arc;

use chrono::Utc;
use feedwatch_core::AccessCredential;
use feedwatch_fetch::HttpClient;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::error::AvitoError;

/// Default token endpoint.
pub const AVITO_TOKEN_URL: &str = "https://api.avito.ru/token/";

/// Issues access tokens. No internal retry.
#[derive(Debug, Clone)]
pub struct AvitoTokenIssuer {
    http: Arc<HttpClient>,
    token_url: String,
}

impl AvitoTokenIssuer {
    /// Creates an issuer posting to `token_url`.
    pub fn new(http: Arc<HttpClient>, token_url: impl Into<String>) -> Self {
        Self {
            http,
            token_url: token_url.into(),
        }
    }

    /// Exchanges client credentials for a fresh access credential.
    #[instrument(skip(self, client_secret))]
    pub async fn issue(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessCredential, AvitoError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ];

        info!("Requesting Avito access token");

        let response = self.http.post_form(&self.token_url, &params).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AvitoError::InvalidResponse(format!("failed to read body: {e}")))?;

        if status != reqwest::StatusCode::OK {
            warn!(status = %status, "Token request rejected");
            return Err(AvitoError::TokenStatus {
                status: status.as_u16(),
                body,
            });
        }

        let credential = parse_token_response(&body)?;
        debug!(expires_at = %credential.expires_at, "Access token issued");
        Ok(credential)
    }
}

/// Extracts `access_token` from a token endpoint body and stamps the expiry.
fn parse_token_response(body: &str) -> Result<AccessCredential, AvitoError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AvitoError::InvalidResponse(format!("JSON error: {e}")))?;

    let token = value
        .as_object()
        .ok_or_else(|| AvitoError::InvalidResponse("expected a JSON object".to_string()))?
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or(AvitoError::MissingAccessToken)?;

    Ok(AccessCredential::issued_at(token, Utc::now()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use feedwatch_core::CREDENTIAL_VALIDITY_HOURS;

    #[test]
    fn test_parse_token_response() {
        let before = Utc::now();
        let cred = parse_token_response(
            r#"{"access_token": "tok", "expires_in": 86400, "token_type": "Bearer"}"#,
        )
        .unwrap();
        let after = Utc::now();

        assert_eq!(cred.access_token, "tok");
        let validity = Duration::hours(CREDENTIAL_VALIDITY_HOURS);
        assert!(cred.expires_at >= before + validity);
        assert!(cred.expires_at <= after + validity);
        assert!(cred.is_valid());
    }

    #[test]
    fn test_missing_token() {
        for body in [r#"{}"#, r#"{"access_token": 7}"#, r#"{"access_token": ""}"#] {
            assert!(
                matches!(parse_token_response(body), Err(AvitoError::MissingAccessToken)),
                "body {body}"
            );
        }
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_token_response("<html>"),
            Err(AvitoError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_token_response("[]"),
            Err(AvitoError::InvalidResponse(_))
        ));
    }
}
