//! Admin console CLI

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console_cli::ConsoleConfig;
use console_cli::commands::Commands;
use console_cli::logging;
use std::path::PathBuf;
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "Admin console for the AI API gateway")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "info")]
    log_level: LogLevel,

    /// Data directory for the session token and logs
    #[arg(short = 'd', long, global = true, env = "CONSOLE_STATE_DIR")]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to ./console.toml when present)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(logging::default_data_dir);
    logging::init_logging(
        cli.log_level.into(),
        &data_dir,
        cli.command.component(),
        cli.no_file_log,
    )?;

    let config = ConsoleConfig::load(cli.config.as_deref())?;
    info!("Starting console CLI");

    match cli.command.execute(&data_dir, config).await {
        Ok(()) => {
            info!("Command completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {e:#}");
            std::process::exit(1);
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
