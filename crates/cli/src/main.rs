//! dbnc - debounce a line stream

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli_lib::cmd;
use cli_lib::cmd::run::RunOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// dbnc - emit only the last line of each burst of input
#[derive(Parser)]
#[command(name = "dbnc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Debounce stdin line by line to stdout
    Run {
        /// Quiet period in milliseconds (overrides the config file)
        #[arg(short, long)]
        delay_ms: Option<u64>,

        /// Config file (default: $DBNC_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Drop the pending line when input ends
        #[arg(long)]
        no_flush: bool,
    },
    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print an example config file
    Example,

    /// Validate a config file and show its effective values
    Check {
        /// Config file path
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only debounced output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { delay_ms, config, no_flush } => {
            cmd::run::run(RunOptions { delay_ms, config, no_flush }).await
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Example => cmd::config::run_example().await,
            ConfigCommands::Check { path } => cmd::config::run_check(&path).await,
        },
    }
}
