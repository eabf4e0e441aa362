//! Carries yesterday's incomplete tasks into today.
//!
//! Usage:
//!
//! ```text
//! carry_forward [--dry-run] [--date YYYY-MM-DD] [--env-file PATH]
//! ```
//!
//! Intended to be triggered once a day by a scheduler. Configuration is read
//! from the environment (see [`carryover::config`]).
//!
//! Exit codes:
//!
//! - 0: every incomplete task was carried and the run was logged.
//! - 1: the run started but failed, including partial writes.
//! - 2: the run could not start because the configuration is unusable or
//!   the HTTP client could not be built.

use camino::Utf8PathBuf;
use carryover::config::AppConfig;
use carryover::task::{
    adapters::notion::{NotionSchema, NotionTaskStore},
    domain::LogEntry,
    services::{CarryForwardError, CarryForwardResult, CarryForwardService},
};
use carryover::telemetry;
use chrono::NaiveDate;
use clap::Parser;
use mockable::DefaultClock;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "carry_forward", version, about = "Carry incomplete tasks into today")]
struct Cli {
    /// Read and reconcile without creating tasks or writing the run log.
    #[arg(long)]
    dry_run: bool,

    /// Carry into this date instead of today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    /// Environment file to load before reading configuration.
    #[arg(long, value_name = "PATH")]
    env_file: Option<Utf8PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(entry) => {
            info!(
                run_date = %entry.run_date(),
                carried = entry.carried_count(),
                message = entry.message().unwrap_or_default(),
                "run finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "run failed");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> CarryForwardResult<LogEntry> {
    let config = AppConfig::from_env(cli.env_file.as_deref())?;
    let store = NotionTaskStore::new(config.notion.clone(), NotionSchema::default())
        .map_err(CarryForwardError::StoreSetup)?;
    let service =
        CarryForwardService::from_config(Arc::new(store), Arc::new(DefaultClock), &config)
            .with_dry_run(cli.dry_run);

    match cli.date {
        Some(date) => service.run_for(date).await,
        None => service.run().await,
    }
}
