//! 監視結果（Observation）のストレージ層
//!
//! SQLiteの `checks` テーブルへ追記専用で永続化する。
//! 並び順は `checked_at` を主キーとし、同一時刻の行は自動採番IDで新旧を決める。

use crate::common::error::{MonitorError, MonitorResult};
use crate::db::traits::ObservationRepository;
use crate::types::{timestamp, CheckStatus, DowntimeEntry, Observation};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// 監視結果ストレージ（SQLite版）
#[derive(Clone)]
pub struct ObservationStorage {
    pool: SqlitePool,
}

impl ObservationStorage {
    /// 新しいストレージインスタンスを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 接続プールへの参照
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ObservationRepository for ObservationStorage {
    async fn append(&self, observation: &Observation) -> MonitorResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO checks (url, status, response_time, checked_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&observation.url)
        .bind(observation.status.to_string())
        .bind(observation.response_time)
        .bind(timestamp::format(&observation.checked_at))
        .execute(&self.pool)
        .await
        .map_err(|e| MonitorError::Database(format!("Failed to save observation: {}", e)))?;

        Ok(result.last_insert_rowid())
    }

    async fn latest_status(&self, url: &str) -> MonitorResult<Option<CheckStatus>> {
        let status = sqlx::query_scalar::<_, String>(
            r#"
            SELECT status FROM checks
            WHERE url = ?
            ORDER BY checked_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MonitorError::Database(format!("Failed to load latest status: {}", e)))?;

        status.map(|s| parse_status(&s)).transpose()
    }

    async fn recent(&self, url: &str, limit: u32) -> MonitorResult<Vec<Observation>> {
        let rows = sqlx::query_as::<_, ObservationRow>(
            r#"
            SELECT url, status, response_time, checked_at FROM checks
            WHERE url = ?
            ORDER BY checked_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(url)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MonitorError::Database(format!("Failed to load recent checks: {}", e)))?;

        rows.into_iter().map(|row| row.try_into()).collect()
    }

    async fn in_range(
        &self,
        url: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MonitorResult<Vec<Observation>> {
        let rows = sqlx::query_as::<_, ObservationRow>(
            r#"
            SELECT url, status, response_time, checked_at FROM checks
            WHERE url = ? AND checked_at BETWEEN ? AND ?
            ORDER BY checked_at ASC, id ASC
            "#,
        )
        .bind(url)
        .bind(timestamp::format(&start))
        .bind(timestamp::format(&end))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MonitorError::Database(format!("Failed to load checks in range: {}", e)))?;

        rows.into_iter().map(|row| row.try_into()).collect()
    }

    async fn distinct_urls(&self) -> MonitorResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT url FROM checks ORDER BY url")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MonitorError::Database(format!("Failed to load urls: {}", e)))
    }

    async fn grouped_downtime(&self, limit: u32) -> MonitorResult<Vec<DowntimeEntry>> {
        // 最後のUPより後にある非UP行が現在のダウン連続区間。
        // 最新がUPのURLはこの条件に該当する行を持たないため除外される。
        let rows = sqlx::query_as::<_, DowntimeRow>(
            r#"
            WITH ranked AS (
                SELECT url, status, checked_at,
                       ROW_NUMBER() OVER (
                           PARTITION BY url ORDER BY checked_at, id
                       ) AS seq
                FROM checks
            ),
            last_up AS (
                SELECT url, MAX(seq) AS last_up_seq
                FROM ranked
                WHERE status = 'UP'
                GROUP BY url
            )
            SELECT r.url AS url, MIN(r.checked_at) AS down_since
            FROM ranked r
            LEFT JOIN last_up l ON l.url = r.url
            WHERE r.status != 'UP'
              AND (l.last_up_seq IS NULL OR r.seq > l.last_up_seq)
            GROUP BY r.url
            ORDER BY down_since DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MonitorError::Database(format!("Failed to load downtime: {}", e)))?;

        rows.into_iter().map(|row| row.try_into()).collect()
    }

    async fn history(&self, limit: u32) -> MonitorResult<Vec<Observation>> {
        let rows = sqlx::query_as::<_, ObservationRow>(
            r#"
            SELECT url, status, response_time, checked_at FROM checks
            ORDER BY checked_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MonitorError::Database(format!("Failed to load history: {}", e)))?;

        rows.into_iter().map(|row| row.try_into()).collect()
    }
}

fn parse_status(value: &str) -> MonitorResult<CheckStatus> {
    value
        .parse()
        .map_err(|e| MonitorError::Database(format!("Invalid status: {}", e)))
}

fn parse_timestamp(value: &str) -> MonitorResult<DateTime<Utc>> {
    timestamp::parse(value)
        .map_err(|e| MonitorError::Database(format!("Invalid timestamp {:?}: {}", value, e)))
}

// --- Internal Row Types ---

#[derive(sqlx::FromRow)]
struct ObservationRow {
    url: String,
    status: String,
    response_time: Option<f64>,
    checked_at: String,
}

impl TryFrom<ObservationRow> for Observation {
    type Error = MonitorError;

    fn try_from(row: ObservationRow) -> Result<Self, Self::Error> {
        Ok(Observation {
            status: parse_status(&row.status)?,
            checked_at: parse_timestamp(&row.checked_at)?,
            url: row.url,
            response_time: row.response_time,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DowntimeRow {
    url: String,
    down_since: String,
}

impl TryFrom<DowntimeRow> for DowntimeEntry {
    type Error = MonitorError;

    fn try_from(row: DowntimeRow) -> Result<Self, Self::Error> {
        Ok(DowntimeEntry {
            down_since: parse_timestamp(&row.down_since)?,
            url: row.url,
        })
    }
}
