//! health subcommand
//!
//! Prints fleet health computed from the configured database.

use crate::common::error::{CommonError, MonitorResult};
use crate::config::get_database_url;
use crate::db::migrations::initialize_database;
use crate::db::ObservationStorage;
use crate::metrics::MetricsAggregator;
use clap::Args;
use std::sync::Arc;

/// Arguments for the health subcommand
#[derive(Args, Debug, Clone)]
pub struct HealthArgs {}

/// Execute the health command
pub async fn execute(_args: &HealthArgs) -> MonitorResult<()> {
    let db_pool = initialize_database(&get_database_url()).await?;
    let aggregator = MetricsAggregator::new(Arc::new(ObservationStorage::new(db_pool)));

    let health = aggregator.fleet_health().await?;
    let json = serde_json::to_string_pretty(&health).map_err(CommonError::from)?;
    println!("{}", json);
    Ok(())
}
