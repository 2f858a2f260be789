// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! feedwatch CLI - listing feed health reports from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Check every platform once and post the reports
//! feedwatch run
//!
//! # Check a single platform, print instead of posting
//! feedwatch --dry-run run --platform avito
//!
//! # Check every day
//! feedwatch watch --interval 86400
//!
//! # Remove leftover diagnostic dumps
//! feedwatch cleanup
//!
//! # Validate configuration
//! feedwatch config check
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{cleanup, config, run, send_file, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// feedwatch CLI - listing feed health reports.
#[derive(Parser)]
#[command(name = "feedwatch")]
#[command(about = "Listing feed health reports for Avito, Cian and Yandex Realty")]
#[command(long_about = r#"
feedwatch checks the latest feed reports of listing platforms and posts a
per-account summary to a Telegram chat.

Supported platforms:
  • Avito (avito)
  • Cian (cian)
  • Yandex Realty (yandex)

Examples:
  feedwatch run                      # All platforms
  feedwatch run --platform cian      # Single platform
  feedwatch --dry-run run            # Print reports instead of posting
  feedwatch watch                    # Repeat on the configured schedule
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the platform config dir).
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for command results (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Print reports to stdout instead of posting them.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logging).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check platforms once and post one report per platform.
    #[command(visible_alias = "r")]
    Run(run::RunArgs),

    /// Repeat `run` on a fixed interval.
    #[command(visible_alias = "w")]
    Watch(watch::WatchArgs),

    /// Remove leftover diagnostic dumps, keeping cached tokens.
    Cleanup(cleanup::CleanupArgs),

    /// Upload a file to the report chat.
    SendFile(send_file::SendFileArgs),

    /// Inspect configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
    /// Configuration is missing or invalid.
    ConfigError = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("feedwatch=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feedwatch=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets may live in a local .env file; a missing file is fine.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let result = match &cli.command {
        Commands::Run(args) => run::run(args, &cli).await,
        Commands::Watch(args) => watch::run(args, &cli).await,
        Commands::Cleanup(args) => cleanup::run(args, &cli),
        Commands::SendFile(args) => send_file::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        let code = if e.downcast_ref::<feedwatch_store::StoreError>().is_some() {
            ExitCode::ConfigError
        } else {
            ExitCode::Error
        };
        std::process::exit(code as i32);
    }

    Ok(())
}
