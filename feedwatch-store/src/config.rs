//! Configuration management.
//!
//! The configuration is a single JSON document. Every section has defaults,
//! so a missing file yields an empty (but valid to load) configuration with
//! no accounts.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use feedwatch_core::{AvitoAccount, CianAccount, Platform, YandexFeed};
use feedwatch_fetch::TelegramConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_config_path, default_state_dir};

/// Environment variable overriding `telegram.bot_token`.
pub const ENV_TELEGRAM_BOT_TOKEN: &str = "FEEDWATCH_TELEGRAM_BOT_TOKEN";
/// Environment variable overriding `telegram.chat_id`.
pub const ENV_TELEGRAM_CHAT_ID: &str = "FEEDWATCH_TELEGRAM_CHAT_ID";
/// Environment variable overriding `yandex.oauth_token`.
pub const ENV_YANDEX_OAUTH_TOKEN: &str = "FEEDWATCH_YANDEX_OAUTH_TOKEN";

const REDACTED: &str = "***";

// ============================================================================
// Config
// ============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Notification sink settings.
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Avito accounts and endpoints.
    #[serde(default)]
    pub avito: AvitoSettings,
    /// Cian accounts and endpoint.
    #[serde(default)]
    pub cian: CianSettings,
    /// Yandex Realty feeds and credentials.
    #[serde(default)]
    pub yandex: YandexSettings,
    /// Directory for cached credentials. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
    /// Diagnostic dump settings.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    /// Watch loop settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Avito settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvitoSettings {
    /// Accounts, in report order.
    #[serde(default)]
    pub accounts: Vec<AvitoAccount>,
    /// Token exchange endpoint.
    #[serde(default = "default_avito_token_url")]
    pub token_url: String,
    /// Last completed autoload report endpoint.
    #[serde(default = "default_avito_report_url")]
    pub report_url: String,
}

/// Cian settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CianSettings {
    /// Accounts, in report order.
    #[serde(default)]
    pub accounts: Vec<CianAccount>,
    /// Last order info endpoint.
    #[serde(default = "default_cian_report_url")]
    pub report_url: String,
}

/// Yandex Realty settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct YandexSettings {
    /// OAuth token shared by all feeds.
    #[serde(default)]
    pub oauth_token: String,
    /// Value of the `X-Authorization` header.
    #[serde(default)]
    pub x_authorization: String,
    /// API base URL; feed state lives at `<api_base>/crm/feed/<id>/state`.
    #[serde(default = "default_yandex_api_base")]
    pub api_base: String,
    /// Feeds, in report order.
    #[serde(default)]
    pub feeds: Vec<YandexFeed>,
}

/// Diagnostic dump settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Whether decoded bodies are written to disk at all.
    #[serde(default)]
    pub enabled: bool,
    /// Output directory. Defaults to the state directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Keep files instead of deleting them right after writing.
    #[serde(default)]
    pub keep: bool,
}

/// Watch loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds between passes.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_avito_token_url() -> String {
    "https://api.avito.ru/token/".to_string()
}

fn default_avito_report_url() -> String {
    "https://api.avito.ru/autoload/v3/reports/last_completed_report".to_string()
}

fn default_cian_report_url() -> String {
    "https://public-api.cian.ru/v1/get-last-order-info".to_string()
}

fn default_yandex_api_base() -> String {
    "https://api.realty.yandex.net/2.0".to_string()
}

fn default_interval_secs() -> u64 {
    24 * 60 * 60
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AvitoSettings {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            token_url: default_avito_token_url(),
            report_url: default_avito_report_url(),
        }
    }
}

impl Default for CianSettings {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            report_url: default_cian_report_url(),
        }
    }
}

impl Default for YandexSettings {
    fn default() -> Self {
        Self {
            oauth_token: String::new(),
            x_authorization: String::new(),
            api_base: default_yandex_api_base(),
            feeds: Vec::new(),
        }
    }
}

impl std::fmt::Debug for YandexSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YandexSettings")
            .field("api_base", &self.api_base)
            .field("feeds", &self.feeds)
            .finish_non_exhaustive()
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScheduleConfig {
    /// Interval between watch passes.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl HttpConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================================
// Loading
// ============================================================================

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file is not an error; defaults are returned.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;

        info!(
            path = %path.display(),
            avito = config.avito.accounts.len(),
            cian = config.cian.accounts.len(),
            yandex = config.yandex.feeds.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Applies secret overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies secret overrides from `lookup`. Empty values are ignored.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str, slot: &mut String| {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                debug!(key, "Applying environment override");
                *slot = value;
            }
        };

        set(ENV_TELEGRAM_BOT_TOKEN, &mut self.telegram.bot_token);
        set(ENV_TELEGRAM_CHAT_ID, &mut self.telegram.chat_id);
        set(ENV_YANDEX_OAUTH_TOKEN, &mut self.yandex.oauth_token);
    }

    /// Directory holding cached credentials.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(default_state_dir)
    }

    /// Directory diagnostic files are written to.
    pub fn diagnostics_dir(&self) -> PathBuf {
        self.diagnostics.dir.clone().unwrap_or_else(|| self.state_dir())
    }

    /// Number of configured accounts for `platform`.
    pub fn account_count(&self, platform: Platform) -> usize {
        match platform {
            Platform::Avito => self.avito.accounts.len(),
            Platform::Cian => self.cian.accounts.len(),
            Platform::Yandex => self.yandex.feeds.len(),
        }
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Lists configuration problems. Empty means the config is usable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.telegram.bot_token.is_empty() {
            problems.push(format!("telegram.bot_token is not set (or {ENV_TELEGRAM_BOT_TOKEN})"));
        }
        if self.telegram.chat_id.is_empty() {
            problems.push(format!("telegram.chat_id is not set (or {ENV_TELEGRAM_CHAT_ID})"));
        }
        if !self.yandex.feeds.is_empty() && self.yandex.oauth_token.is_empty() {
            problems.push(format!(
                "yandex.oauth_token is required when feeds are configured (or {ENV_YANDEX_OAUTH_TOKEN})"
            ));
        }
        if self.schedule.interval_secs == 0 {
            problems.push("schedule.interval_secs must be greater than zero".to_string());
        }
        if self.http.timeout_secs == 0 {
            problems.push("http.timeout_secs must be greater than zero".to_string());
        }

        check_names(
            Platform::Avito,
            self.avito.accounts.iter().map(|a| a.name.as_str()),
            &mut problems,
        );
        check_names(
            Platform::Cian,
            self.cian.accounts.iter().map(|a| a.name.as_str()),
            &mut problems,
        );
        check_names(
            Platform::Yandex,
            self.yandex.feeds.iter().map(|f| f.name.as_str()),
            &mut problems,
        );

        problems
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), StoreError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Config(problems.join("; ")))
        }
    }

    /// Returns a copy with every secret masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        mask(&mut copy.telegram.bot_token);
        mask(&mut copy.yandex.oauth_token);
        mask(&mut copy.yandex.x_authorization);
        for account in &mut copy.avito.accounts {
            mask(&mut account.client_secret);
        }
        for account in &mut copy.cian.accounts {
            mask(&mut account.token);
        }
        copy
    }
}

/// Account names must be non-empty and unique within a platform, since they
/// key the credential cache and the report lines.
fn check_names<'a>(
    platform: Platform,
    names: impl Iterator<Item = &'a str>,
    problems: &mut Vec<String>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            problems.push(format!("{platform}: account with empty name"));
        } else if !seen.insert(feedwatch_core::account_key(name)) {
            problems.push(format!("{platform}: duplicate account name {name:?}"));
        }
    }
}

fn mask(secret: &mut String) {
    if !secret.is_empty() {
        *secret = REDACTED.to_string();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample_json() -> &'static str {
        r#"{
            "telegram": { "bot_token": "123:abc", "chat_id": "-100" },
            "avito": { "accounts": [
                { "name": "Test Co", "client_id": "id", "client_secret": "secret" },
                { "name": "Second", "client_id": "id2", "client_secret": "secret2" }
            ] },
            "cian": { "accounts": [ { "name": "North", "token": "cian-token" } ] },
            "yandex": {
                "oauth_token": "oauth",
                "x_authorization": "Vertis crm-1",
                "feeds": [ { "name": "South", "feed_id": "42" } ]
            },
            "state_dir": "/var/lib/feedwatch"
        }"#
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.avito.accounts.is_empty());
        assert_eq!(config.avito.token_url, "https://api.avito.ru/token/");
        assert_eq!(
            config.cian.report_url,
            "https://public-api.cian.ru/v1/get-last-order-info"
        );
        assert_eq!(config.schedule.interval(), Duration::from_secs(86_400));
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.telegram.parse_mode, "Markdown");
    }

    #[test]
    fn test_parse_preserves_account_order() {
        let config: Config = serde_json::from_str(sample_json()).unwrap();
        let names: Vec<_> = config.avito.accounts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Test Co", "Second"]);
        assert_eq!(config.yandex.feeds[0].feed_id, "42");
        assert_eq!(config.state_dir(), PathBuf::from("/var/lib/feedwatch"));
        assert_eq!(config.diagnostics_dir(), PathBuf::from("/var/lib/feedwatch"));
        assert_eq!(
            config.avito.report_url,
            "https://api.avito.ru/autoload/v3/reports/last_completed_report"
        );
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.account_count(Platform::Avito), 0);
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config: Config = serde_json::from_str(sample_json()).unwrap();
        let env: HashMap<&str, &str> = [
            (ENV_TELEGRAM_BOT_TOKEN, "999:zzz"),
            (ENV_TELEGRAM_CHAT_ID, ""),
            (ENV_YANDEX_OAUTH_TOKEN, "fresh"),
        ]
        .into_iter()
        .collect();

        config.apply_env_overrides_from(|k| env.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.telegram.bot_token, "999:zzz");
        assert_eq!(config.telegram.chat_id, "-100", "empty override is ignored");
        assert_eq!(config.yandex.oauth_token, "fresh");
    }

    #[test]
    fn test_validate() {
        let config: Config = serde_json::from_str(sample_json()).unwrap();
        assert!(config.validate().is_ok());

        let empty = Config::default();
        let problems = empty.problems();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("bot_token"));
        assert!(matches!(empty.validate(), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_validate_duplicate_names() {
        let mut config: Config = serde_json::from_str(sample_json()).unwrap();
        config
            .avito
            .accounts
            .push(AvitoAccount::new("test co", "x", "y"));
        let problems = config.problems();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("duplicate"));
    }

    #[test]
    fn test_validate_yandex_requires_token() {
        let mut config: Config = serde_json::from_str(sample_json()).unwrap();
        config.yandex.oauth_token.clear();
        assert!(config.problems()[0].contains("yandex.oauth_token"));
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let config: Config = serde_json::from_str(sample_json()).unwrap();
        let shown = serde_json::to_string(&config.redacted()).unwrap();

        for secret in ["123:abc", "secret", "secret2", "cian-token", "oauth", "Vertis crm-1"] {
            assert!(!shown.contains(&format!("\"{secret}\"")), "leaked {secret}");
        }
        assert!(shown.contains("Test Co"));
        assert!(shown.contains("\"chat_id\":\"-100\""));
    }
}
