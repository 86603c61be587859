//! serve サブコマンド
//!
//! HTTPサーバーを起動します。`URLWATCH_WATCH_URLS` が設定されていれば
//! 定期チェックも開始します。

use crate::common::error::MonitorResult;
use crate::config::{
    get_database_url, get_env_with_fallback_or, get_env_with_fallback_parse, AppConfig, WatchConfig,
};
use crate::db::migrations::initialize_database;
use crate::health::CheckScheduler;
use crate::{server, AppState};
use clap::Args;
use tracing::info;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "8000", env = "URLWATCH_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "URLWATCH_HOST")]
    pub host: String,
}

impl ServeArgs {
    /// 環境変数のみから引数を組み立てる（サブコマンド省略時）
    pub fn from_env() -> Self {
        Self {
            port: get_env_with_fallback_parse("URLWATCH_PORT", "URLWATCH_PORT", 8000),
            host: get_env_with_fallback_or("URLWATCH_HOST", "URLWATCH_HOST", "0.0.0.0"),
        }
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs) -> MonitorResult<()> {
    info!("urlwatch v{}", env!("CARGO_PKG_VERSION"));

    let database_url = get_database_url();
    let db_pool = initialize_database(&database_url).await?;
    info!(database_url = %database_url, "Database initialized");

    let config = AppConfig::from_env();
    let state = AppState::build(db_pool, &config)?;

    let watch = WatchConfig::from_env();
    let scheduler = if watch.is_enabled() {
        Some(CheckScheduler::new(state.orchestrator.clone(), watch).start())
    } else {
        None
    };

    let result = server::run(state, &args.bind_addr()).await;

    if let Some(handle) = scheduler {
        handle.abort();
    }
    result
}
