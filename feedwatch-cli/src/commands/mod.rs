//! CLI command implementations.

pub mod cleanup;
pub mod config;
pub mod run;
pub mod send_file;
pub mod watch;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use feedwatch_core::Platform;
use feedwatch_fetch::{
    DiagnosticSink, FetchContext, FileDiagnostics, NoopDiagnostics, NotificationSink, StdoutSink,
    TelegramSink,
};
use feedwatch_store::Config;
use tracing::debug;

use crate::Cli;

/// Loads the configuration named on the command line (or the default one)
/// and applies environment overrides.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_from(&path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    config.apply_env_overrides();
    Ok(config)
}

/// Parses a platform selector: `all`, a platform name, or a comma-separated
/// list of names. Order follows [`Platform::ALL`], duplicates are dropped.
pub fn select_platforms(selector: &str) -> Result<Vec<Platform>> {
    if selector.trim().eq_ignore_ascii_case("all") {
        return Ok(Platform::ALL.to_vec());
    }

    let mut wanted = Vec::new();
    for name in selector.split(',').filter(|s| !s.trim().is_empty()) {
        wanted.push(Platform::from_str(name)?);
    }
    if wanted.is_empty() {
        bail!("no platform selected");
    }

    Ok(Platform::ALL
        .into_iter()
        .filter(|p| wanted.contains(p))
        .collect())
}

/// Builds the fetch context: HTTP client with the configured timeout and the
/// diagnostic sink.
pub fn build_context(config: &Config) -> Result<FetchContext> {
    let diagnostics: Arc<dyn DiagnosticSink> = if config.diagnostics.enabled {
        let dir = config.diagnostics_dir();
        debug!(dir = %dir.display(), keep = config.diagnostics.keep, "Diagnostics enabled");
        Arc::new(FileDiagnostics::new(dir, config.diagnostics.keep))
    } else {
        Arc::new(NoopDiagnostics)
    };

    FetchContext::builder()
        .timeout(config.http.timeout())
        .diagnostics(diagnostics)
        .build()
        .context("failed to build HTTP client")
}

/// Chooses where reports go: stdout for dry runs, Telegram otherwise.
pub fn build_sink(
    config: &Config,
    ctx: &FetchContext,
    dry_run: bool,
) -> Result<Arc<dyn NotificationSink>> {
    if dry_run {
        return Ok(Arc::new(StdoutSink));
    }
    if !config.telegram.is_configured() {
        bail!(
            "telegram.bot_token and telegram.chat_id must be set (or use --dry-run); \
             see `feedwatch config check`"
        );
    }
    Ok(Arc::new(TelegramSink::new(
        config.telegram.clone(),
        Arc::clone(&ctx.http),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all() {
        assert_eq!(select_platforms("all").unwrap(), Platform::ALL.to_vec());
        assert_eq!(select_platforms("ALL").unwrap(), Platform::ALL.to_vec());
    }

    #[test]
    fn test_select_list_keeps_canonical_order() {
        assert_eq!(
            select_platforms("yandex,avito,yandex").unwrap(),
            vec![Platform::Avito, Platform::Yandex]
        );
    }

    #[test]
    fn test_select_unknown() {
        assert!(select_platforms("domclick").is_err());
        assert!(select_platforms(",").is_err());
    }

    #[test]
    fn test_sink_requires_telegram_unless_dry_run() {
        let config = Config::default();
        let ctx = build_context(&config).unwrap();
        assert!(build_sink(&config, &ctx, false).is_err());
        assert!(build_sink(&config, &ctx, true).is_ok());
    }

    #[test]
    fn test_context_uses_configured_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 5;
        let ctx = build_context(&config).unwrap();
        assert_eq!(ctx.timeout(), std::time::Duration::from_secs(5));
    }
}
