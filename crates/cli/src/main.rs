//! specaudit entry point.

mod artifact;
mod cli;
mod cmd_audit;
mod cmd_runs;
mod cmd_validate;
mod config;
mod coverage;
mod discovery;
mod regression;
mod report;
mod results;
mod runs;
mod spec;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::Config;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("SPECAUDIT_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::Completions(args) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(args.shell, &mut cmd, "specaudit", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    match &cli.command {
        Command::Audit(args) => cmd_audit::run(&config, args.output),
        Command::Validate(args) => cmd_validate::run(&config, args.output),
        Command::Runs(args) => cmd_runs::run(&config, &args.command),
        Command::Completions(_) => Ok(ExitCode::SUCCESS),
    }
}

/// Resolve configuration: explicit flag first, then discovery from the
/// working directory, then defaults rooted at the working directory.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        return Config::load(path);
    }
    let cwd = std::env::current_dir()?;
    match discovery::find_config(&cwd) {
        Some(path) => Config::load(&path),
        None => Ok(Config::default_at(&cwd)),
    }
}
