//! CLI module for urlwatch
//!
//! Provides the command-line interface for the monitor.

pub mod check;
pub mod health;
pub mod serve;

use clap::{Parser, Subcommand};

/// urlwatch - URL uptime monitor with flap detection
#[derive(Parser, Debug)]
#[command(name = "urlwatch")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    URLWATCH_HOST                  Bind address (default: 0.0.0.0)
    URLWATCH_PORT                  Listen port (default: 8000)
    URLWATCH_DATABASE_URL          Database URL (default: sqlite:url_checks.db)
    URLWATCH_LOG_LEVEL             Log level (default: info)
    URLWATCH_LOG_DIR               Also write JSON logs to this directory
    URLWATCH_CHECK_TIMEOUT_SECS    Probe timeout (default: 5)
    URLWATCH_CHECK_CONCURRENCY     Probes in flight per batch (default: 8)
    URLWATCH_FLAP_THRESHOLD        Flips that mark a URL as flapping (default: 3)
    URLWATCH_FLAP_WINDOW           Observations inspected for flaps (default: 10)
    URLWATCH_CLASSIFIER_API_TOKEN  Bearer token for /classify
    URLWATCH_WATCH_URLS            Comma-separated URLs checked periodically
    URLWATCH_WATCH_INTERVAL_SECS   Period of scheduled checks (default: 60)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve(serve::ServeArgs),
    /// Check URLs once and print the results as JSON
    Check(check::CheckArgs),
    /// Print fleet health as JSON
    Health(health::HealthArgs),
}
