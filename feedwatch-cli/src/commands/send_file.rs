//! Send-file command - upload a file to the report chat.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use feedwatch_providers::Reporter;

use super::{build_context, build_sink, load_config};
use crate::Cli;

/// Arguments for the send-file command.
#[derive(Args)]
pub struct SendFileArgs {
    /// File to upload, e.g. a kept diagnostic dump.
    pub path: PathBuf,
}

/// Runs the send-file command.
pub async fn run(args: &SendFileArgs, cli: &Cli) -> Result<()> {
    if !args.path.is_file() {
        bail!("{} is not a file", args.path.display());
    }

    let config = load_config(cli)?;
    let ctx = build_context(&config)?;
    let reporter = Reporter::new(build_sink(&config, &ctx, cli.dry_run)?);

    reporter.attach(&args.path).await;
    Ok(())
}
