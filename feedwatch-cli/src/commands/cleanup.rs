//! Cleanup command - remove leftover diagnostic dumps.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use feedwatch_fetch::cleanup_artifacts;
use feedwatch_providers::avito::CREDENTIAL_PREFIX;
use feedwatch_store::FileCredentialStore;
use tracing::info;

use super::load_config;
use crate::Cli;

/// Arguments for the cleanup command.
#[derive(Args)]
pub struct CleanupArgs {
    /// Directory to clean (defaults to the diagnostics directory).
    #[arg(long, short)]
    pub dir: Option<PathBuf>,
}

/// Runs the cleanup command.
pub fn run(args: &CleanupArgs, cli: &Cli) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => load_config(cli)?.diagnostics_dir(),
    };

    if !dir.exists() {
        info!(dir = %dir.display(), "Nothing to clean");
        return Ok(());
    }

    let removed = clean_dir(&dir)?;
    if !cli.quiet {
        println!("Removed {removed} file(s) from {}", dir.display());
    }
    Ok(())
}

/// Removes `*.json` files in `dir`, keeping cached credentials.
fn clean_dir(dir: &std::path::Path) -> Result<usize> {
    let credentials = FileCredentialStore::new(dir, CREDENTIAL_PREFIX).file_prefix();
    cleanup_artifacts(dir, &[credentials.as_str()])
        .with_context(|| format!("failed to clean {}", dir.display()))
}
