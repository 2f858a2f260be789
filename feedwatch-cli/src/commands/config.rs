//! Config command - inspect configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use feedwatch_core::Platform;
use feedwatch_store::{default_state_dir, Config, StoreError};

use super::load_config;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration with secrets masked.
    Show,

    /// Show configuration paths.
    Path,

    /// Validate the configuration.
    Check,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Check => check_config(cli),
    }
}

fn show_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?.redacted();
    // JSON is the native format, so text mode prints it pretty.
    let formatter = JsonFormatter::new(cli.pretty || cli.format == OutputFormat::Text);
    println!("{}", formatter.format(&config)?);
    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_file = cli.config.clone().unwrap_or_else(Config::default_path);
    let state_dir = match Config::load_from(&config_file) {
        Ok(config) => config.state_dir(),
        Err(_) => default_state_dir(),
    };

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config file: {}", config_file.display());
            println!("State dir:   {}", state_dir.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_file": config_file.display().to_string(),
                "state_dir": state_dir.display().to_string(),
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
        }
    }
    Ok(())
}

fn check_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let problems = config.problems();

    for platform in Platform::ALL {
        println!("{:<8} {} account(s)", platform.cli_name(), config.account_count(platform));
    }

    if problems.is_empty() {
        println!("Configuration OK");
        return Ok(());
    }

    for problem in &problems {
        println!("  ✗ {problem}");
    }
    Err(StoreError::Config(format!("{} problem(s) found", problems.len())).into())
}
