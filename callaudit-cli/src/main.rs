//! callaudit -- command-line entry point for the call-in/call-out audit.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use callaudit_core::config::CallauditConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Config problems are reported by the command itself; logging falls back to defaults.
    let general = CallauditConfig::load_or_default(&cli.config)
        .await
        .map(|c| c.general)
        .unwrap_or_default();

    let level = logging::effective_level(
        &general,
        cli.log_level.as_deref(),
        cli.command.log_level_hint(),
    )
    .to_owned();

    if let Err(e) = logging::init_tracing(&general, &level) {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }

    callaudit_core::metrics::describe_all();
    tracing::debug!(config = %cli.config.display(), "callaudit starting");

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Audit(args) => commands::audit::execute(args, &cli.config, &writer).await,
        Commands::Catchers(args) => commands::catchers::execute(args, &cli.config, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
