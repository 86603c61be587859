//! check subcommand
//!
//! Runs one batch against the configured database and prints the results.

use crate::common::error::{CommonError, MonitorResult};
use crate::config::{get_database_url, AppConfig};
use crate::db::migrations::initialize_database;
use crate::AppState;
use clap::Args;

/// Arguments for the check subcommand
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// URLs to check (absolute http/https)
    #[arg(required = true)]
    pub urls: Vec<String>,
}

/// Execute the check command
pub async fn execute(args: &CheckArgs) -> MonitorResult<()> {
    crate::api::validate_urls(&args.urls)?;

    let db_pool = initialize_database(&get_database_url()).await?;
    let state = AppState::build(db_pool, &AppConfig::from_env())?;

    let results = state.orchestrator.check_all(&args.urls).await?;
    let json = serde_json::to_string_pretty(&results).map_err(CommonError::from)?;
    println!("{}", json);
    Ok(())
}
