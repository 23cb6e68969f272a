// ABOUTME: Entry point for the slipway CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use slipway::config::{self, Config};
use slipway::error::Result;
use slipway::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    match cli.command {
        Commands::Init { force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, force)?;
            output.success("Created slipway.yml");
            Ok(())
        }
        Commands::Deploy => {
            let config = discover_config()?;
            commands::deploy(config, output).await
        }
        Commands::SetActive { deployment } => {
            let config = discover_config()?;
            commands::set_active(config, &deployment, output).await
        }
        Commands::Delete { deployment } => {
            let config = discover_config()?;
            commands::delete(config, &deployment, output).await
        }
        Commands::Status => {
            let config = discover_config()?;
            commands::status(config, output).await
        }
    }
}

fn discover_config() -> Result<Config> {
    let cwd = env::current_dir()?;
    Config::discover(&cwd)
}
