//! Telegram Bot API notification sink.
//!
//! Sends messages via `POST /bot<token>/sendMessage` and files via
//! `POST /bot<token>/sendDocument`. Failures are logged and dropped: a
//! report that cannot be delivered is not retried.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use super::http::{join_url, HttpClient};
use crate::error::NotifyError;
use crate::notify::NotificationSink;

/// Default Bot API base URL.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

// ============================================================================
// Configuration
// ============================================================================

/// Telegram sink configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token.
    #[serde(default)]
    pub bot_token: String,
    /// Target chat or channel id.
    #[serde(default)]
    pub chat_id: String,
    /// Parse mode for message formatting.
    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,
    /// Bot API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_parse_mode() -> String {
    "Markdown".to_string()
}

fn default_api_base() -> String {
    TELEGRAM_API_BASE.to_string()
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            parse_mode: default_parse_mode(),
            api_base: default_api_base(),
        }
    }
}

impl TelegramConfig {
    /// Returns true if both the bot token and chat id are set.
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }

    fn method_url(&self, method: &str) -> Result<String, NotifyError> {
        if self.bot_token.is_empty() {
            return Err(NotifyError::NotConfigured("bot_token"));
        }
        if self.chat_id.is_empty() {
            return Err(NotifyError::NotConfigured("chat_id"));
        }
        Ok(join_url(
            &self.api_base,
            &format!("bot{}/{method}", self.bot_token),
        )?)
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("parse_mode", &self.parse_mode)
            .field("api_base", &self.api_base)
            .finish()
    }
}

// ============================================================================
// Sink
// ============================================================================

/// Telegram notification sink.
#[derive(Debug, Clone)]
pub struct TelegramSink {
    config: TelegramConfig,
    http: Arc<HttpClient>,
}

impl TelegramSink {
    /// Creates a new sink.
    pub fn new(config: TelegramConfig, http: Arc<HttpClient>) -> Self {
        Self { config, http }
    }

    /// Sends a text message.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let url = self.config.method_url("sendMessage")?;
        let payload = json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": self.config.parse_mode,
        });

        let response = self.http.post_json(&url, &payload).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Telegram message sent");
        Ok(())
    }

    /// Uploads a file as a document.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn send_document(&self, path: &Path) -> Result<(), NotifyError> {
        let url = self.config.method_url("sendDocument")?;
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "document".to_string(), |n| n.to_string_lossy().into_owned());

        let form = Form::new()
            .text("chat_id", self.config.chat_id.clone())
            .part("document", Part::bytes(bytes).file_name(file_name));

        let response = self.http.post_multipart(&url, form).await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(response = %body, "Telegram file upload response");
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for TelegramSink {
    async fn post_message(&self, text: &str) {
        if let Err(e) = self.send_message(text).await {
            warn!(error = %e, "Error sending Telegram message");
        }
    }

    async fn post_file(&self, path: &Path) {
        if let Err(e) = self.send_document(path).await {
            warn!(path = %path.display(), error = %e, "Error sending file to Telegram");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
