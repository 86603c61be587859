//! urlwatch Server Entry Point

use clap::Parser;
use urlwatch::cli::{self, serve::ServeArgs, Cli, Commands};
use urlwatch::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve(args)) => cli::serve::execute(&args).await,
        Some(Commands::Check(args)) => cli::check::execute(&args).await,
        Some(Commands::Health(args)) => cli::health::execute(&args).await,
        None => {
            // No subcommand - default to serve
            cli::serve::execute(&ServeArgs::from_env()).await
        }
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
