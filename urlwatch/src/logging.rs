//! ロギング初期化
//!
//! 標準出力への人間向けログと、任意でJSON形式の日次ローテーションファイルを出力する。

use crate::common::error::{CommonError, MonitorError, MonitorResult};
use crate::config::get_env_with_fallback;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_PREFIX: &str = "urlwatch.jsonl";

/// ログ出力ディレクトリ（`URLWATCH_LOG_DIR`、未設定ならファイル出力なし）
pub fn log_dir() -> Option<PathBuf> {
    get_env_with_fallback("URLWATCH_LOG_DIR", "URLWATCH_LOG_DIR")
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
}

/// フィルター文字列を決定する（`URLWATCH_LOG_LEVEL` > `RUST_LOG` > `info`）
fn filter_directive() -> String {
    get_env_with_fallback("URLWATCH_LOG_LEVEL", "RUST_LOG")
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// グローバルsubscriberを初期化する
///
/// ファイル出力を有効にした場合は`WorkerGuard`を返す。
/// プロセス終了までドロップしないこと（未書き込みのログが失われる）。
pub fn init() -> MonitorResult<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(filter_directive()).map_err(|e| {
        MonitorError::Common(CommonError::Config(format!("Invalid log filter: {}", e)))
    })?;

    let stdout_layer = fmt::layer().with_target(true);

    let (file_layer, guard) = match log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir).map_err(|e| {
                MonitorError::Common(CommonError::Config(format!(
                    "Failed to create log directory {}: {}",
                    dir.display(),
                    e
                )))
            })?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_current_span(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| MonitorError::Internal(format!("Failed to set logger: {}", e)))?;

    Ok(guard)
}
