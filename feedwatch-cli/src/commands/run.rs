//! Run command - one pass over the selected platforms.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use feedwatch_core::{Platform, Report};
use feedwatch_fetch::FetchContext;
use feedwatch_providers::avito::CREDENTIAL_PREFIX;
use feedwatch_providers::{
    today, AvitoReportFetcher, CianStatusFetcher, Reporter, YandexFeedFetcher,
};
use feedwatch_store::{Config, FileCredentialStore};
use tracing::info;

use super::{build_context, build_sink, load_config, select_platforms};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Platforms to check: avito, cian, yandex, a comma-separated list, or all.
    #[arg(long, short, default_value = "all")]
    pub platform: String,
}

/// Runs the run command.
pub async fn run(args: &RunArgs, cli: &Cli) -> Result<()> {
    let platforms = select_platforms(&args.platform)?;
    let config = load_config(cli)?;
    let ctx = build_context(&config)?;
    let reporter = Reporter::new(build_sink(&config, &ctx, cli.dry_run)?);

    let reports = run_pass(&config, &platforms, &ctx, &reporter).await;
    print_reports(&reports, cli)
}

/// Checks each platform in turn and posts its report. Platforms without
/// accounts are skipped. Never fails: account problems end up in the
/// reports.
pub async fn run_pass(
    config: &Config,
    platforms: &[Platform],
    ctx: &FetchContext,
    reporter: &Reporter,
) -> Vec<Report> {
    let date = today();
    let mut reports = Vec::with_capacity(platforms.len());

    for &platform in platforms {
        if config.account_count(platform) == 0 {
            info!(platform = %platform, "No accounts configured, skipping");
            continue;
        }

        let report = match platform {
            Platform::Avito => {
                let store = Arc::new(FileCredentialStore::new(
                    config.state_dir(),
                    CREDENTIAL_PREFIX,
                ));
                let fetcher = AvitoReportFetcher::from_settings(&config.avito, ctx, store);
                reporter.run(&fetcher, date).await
            }
            Platform::Cian => {
                let fetcher = CianStatusFetcher::from_settings(&config.cian, ctx);
                reporter.run(&fetcher, date).await
            }
            Platform::Yandex => {
                let fetcher = YandexFeedFetcher::from_settings(&config.yandex, ctx);
                reporter.run(&fetcher, date).await
            }
        };
        reports.push(report);
    }

    reports
}

fn print_reports(reports: &[Report], cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                let formatter = TextFormatter::new();
                println!("{}", formatter.format_summary(reports));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(reports)?);
        }
    }
    Ok(())
}
