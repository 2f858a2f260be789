//! Yandex per-feed status pass.

use std::sync::Arc;

use feedwatch_core::{account_key, Platform, StatusCollector, StatusLine, YandexFeed};
use feedwatch_fetch::{DiagnosticSink, FetchContext};
use feedwatch_store::YandexSettings;
use serde_json::Value;
use tracing::{error, info, instrument};

use super::api::YandexApiClient;
use super::error::YandexError;
use super::parser::feed_errors;

/// Checks every configured Yandex feed.
pub struct YandexFeedFetcher {
    feeds: Vec<YandexFeed>,
    api: YandexApiClient,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl YandexFeedFetcher {
    /// Creates a fetcher from its parts.
    pub fn new(
        feeds: Vec<YandexFeed>,
        api: YandexApiClient,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            feeds,
            api,
            diagnostics,
        }
    }

    /// Creates a fetcher from configuration and a fetch context.
    pub fn from_settings(settings: &YandexSettings, ctx: &FetchContext) -> Self {
        Self::new(
            settings.feeds.clone(),
            YandexApiClient::new(
                Arc::clone(&ctx.http),
                settings.api_base.clone(),
                settings.oauth_token.clone(),
                settings.x_authorization.clone(),
            ),
            Arc::clone(&ctx.diagnostics),
        )
    }

    /// Checks one feed.
    #[instrument(skip(self, feed), fields(account = %feed.name, feed_id = %feed.feed_id))]
    pub async fn check_feed(&self, feed: &YandexFeed) -> StatusLine {
        let key = account_key(&feed.name);

        let state = match self.api.feed_state(&feed.feed_id).await {
            Ok(state) => state,
            Err(e) => {
                error!(error = %e, "Yandex check failed");
                if let YandexError::Status { body, .. } = &e {
                    self.diagnostics
                        .record(&format!("{key}_yandex_response"), &Value::Object(body.clone()));
                }
                return StatusLine::failed(Platform::Yandex, feed.name.clone(), e.failure_kind());
            }
        };

        let errors = feed_errors(&state);
        if !errors.is_empty() {
            self.diagnostics
                .record(&format!("{key}_yandex_errors"), &Value::Array(errors.to_vec()));
        }

        info!(errors = errors.len(), "Yandex feed checked");
        let line = StatusLine::classify(Platform::Yandex, feed.name.clone(), errors.len(), 0);

        self.diagnostics
            .record(&format!("{key}_yandex_response"), &Value::Object(state));
        line
    }
}

impl std::fmt::Debug for YandexFeedFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YandexFeedFetcher")
            .field("feeds", &self.feeds)
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl StatusCollector for YandexFeedFetcher {
    fn platform(&self) -> Platform {
        Platform::Yandex
    }

    async fn collect(&self) -> Vec<StatusLine> {
        let mut lines = Vec::with_capacity(self.feeds.len());
        for feed in &self.feeds {
            lines.push(self.check_feed(feed).await);
        }
        lines
    }
}
