//! Dataflow Monitor CLI
//!
//! Terminal dashboard for the Dataflow log-analytics API.
//!
//! # Usage
//!
//! ```bash
//! dataflow-monitor --help
//! dataflow-monitor --api-url http://localhost:8000 --log-file monitor.log
//! dataflow-monitor snapshot --json
//! ```

#![deny(unsafe_code)]

mod snapshot;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use monitor::{Config, Dashboard, DEFAULT_API_BASE_URL, DEFAULT_REFRESH_INTERVAL_SECS};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Dataflow Monitor - live log-analytics dashboard
#[derive(Parser)]
#[command(name = "dataflow-monitor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Analytics API base URL
    #[arg(short, long, env = "DATAFLOW_API_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    /// Seconds between scheduled refreshes
    #[arg(
        short,
        long,
        env = "DATAFLOW_REFRESH_SECS",
        default_value_t = DEFAULT_REFRESH_INTERVAL_SECS
    )]
    interval_secs: u64,

    /// Write logs to this file (the dashboard itself owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the live dashboard (default)
    Watch,
    /// Run one refresh cycle and print the result
    Snapshot {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Watch);
    init_tracing(
        cli.log_file.as_deref(),
        cli.log_json,
        matches!(command, Commands::Snapshot { .. }),
    )?;

    let config = Config::new(cli.api_url, cli.interval_secs)
        .context("invalid dashboard configuration")?;
    let dashboard = Dashboard::new(&config);

    match command {
        Commands::Watch => {
            tui::run(dashboard).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Snapshot { json } => {
            let connected = dashboard.refresh().await;
            let view = dashboard.snapshot();
            let output = if json {
                snapshot::render_json(dashboard.api_base_url(), &view)?
            } else {
                snapshot::render_text(dashboard.api_base_url(), &view)
            };
            println!("{output}");

            Ok(if connected {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Initializes tracing.
///
/// Logs go to `log_file` when given. Without one, only the snapshot command
/// logs (to stderr); the live dashboard stays silent so the terminal is not
/// corrupted.
fn init_tracing(log_file: Option<&std::path::Path>, json: bool, to_stderr: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
            if json {
                builder.json().init();
            } else {
                builder.init();
            }
        }
        None if to_stderr => {
            let builder = builder.with_writer(std::io::stderr);
            if json {
                builder.json().init();
            } else {
                builder.init();
            }
        }
        None => {}
    }

    Ok(())
}
