//! データベース初期化とマイグレーション実行

use crate::common::error::MonitorError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// 書き込み競合時の待機上限
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// ファイルDBの最大接続数
const MAX_CONNECTIONS: u32 = 5;

/// SQLiteデータベース接続プールを作成してマイグレーションを実行
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite:data/url_checks.db"）
///
/// # Returns
/// * `Ok(SqlitePool)` - 初期化済みデータベースプール
/// * `Err(MonitorError)` - 初期化失敗
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, MonitorError> {
    let in_memory = database_url.contains(":memory:");

    // SQLiteファイルはディレクトリが存在しないと作成できないため、先に作成しておく
    if !in_memory {
        ensure_parent_dir(database_url)?;
    }

    let mut options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| MonitorError::Database(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    // インメモリDBは単一接続に限定し、全クエリで同じDBを共有する
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| MonitorError::Database(format!("Failed to connect to database: {}", e)))?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MonitorError> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| MonitorError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

fn ensure_parent_dir(database_url: &str) -> Result<(), MonitorError> {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    // `sqlite://` 形式に備えてスラッシュを除去し、クエリ部分を除外
    let normalized = path.trim_start_matches("//");
    let path_without_params = normalized.split('?').next().unwrap_or(normalized);
    let db_path = std::path::Path::new(path_without_params);
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MonitorError::Database(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
