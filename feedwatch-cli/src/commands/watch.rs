//! Watch command - repeat the run pass on a schedule.

use anyhow::{bail, Result};
use clap::Args;
use feedwatch_providers::Reporter;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::info;

use super::run::run_pass;
use super::{build_context, build_sink, load_config, select_platforms};
use crate::Cli;

/// Arguments for watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Seconds between passes (defaults to `schedule.interval_secs`).
    #[arg(long, short)]
    pub interval: Option<u64>,

    /// Platforms to check: avito, cian, yandex, a comma-separated list, or all.
    #[arg(long, short, default_value = "all")]
    pub platform: String,
}

/// Runs the watch command until interrupted.
pub async fn run(args: &WatchArgs, cli: &Cli) -> Result<()> {
    let platforms = select_platforms(&args.platform)?;
    let config = load_config(cli)?;
    let seconds = args.interval.unwrap_or(config.schedule.interval_secs);
    if seconds == 0 {
        bail!("interval must be greater than zero");
    }

    let ctx = build_context(&config)?;
    let reporter = Reporter::new(build_sink(&config, &ctx, cli.dry_run)?);

    info!(interval = seconds, "Starting watch mode");

    let mut ticker = interval(Duration::from_secs(seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let reports = run_pass(&config, &platforms, &ctx, &reporter).await;
                info!(reports = reports.len(), "Pass finished");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch mode");
                return Ok(());
            }
        }
    }
}
