//! 稼働状況API
//!
//! `GET /health`、`GET /metrics/{url}`、`GET /recent_downtime` を提供する。

use super::error::AppError;
use crate::metrics::{FleetHealth, UptimePeriod, UptimeReport};
use crate::types::DowntimeEntry;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

const DEFAULT_DOWNTIME_LIMIT: u32 = 5;

/// 稼働率取得クエリパラメーター
#[derive(Debug, Clone, Deserialize)]
pub struct UptimeQuery {
    /// 集計期間（24h / 7d / 30d）
    pub period: Option<String>,
}

/// ダウンタイム取得クエリパラメーター
#[derive(Debug, Clone, Deserialize)]
pub struct DowntimeQuery {
    /// 取得件数
    #[serde(default = "default_downtime_limit")]
    pub limit: u32,
}

fn default_downtime_limit() -> u32 {
    DEFAULT_DOWNTIME_LIMIT
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> Result<Json<FleetHealth>, AppError> {
    Ok(Json(state.aggregator.fleet_health().await?))
}

/// GET /metrics/{url}
///
/// 対象URLはパスの残り全体（パーセントデコード済み）。
pub async fn get_uptime(
    State(state): State<AppState>,
    Path(url): Path<String>,
    query: Result<Query<UptimeQuery>, QueryRejection>,
) -> Result<Json<UptimeReport>, AppError> {
    let Query(query) = query?;
    let period = match query.period.as_deref() {
        Some(raw) => raw.parse::<UptimePeriod>()?,
        None => UptimePeriod::default(),
    };
    Ok(Json(state.aggregator.uptime(&url, period).await?))
}

/// GET /recent_downtime
pub async fn get_recent_downtime(
    State(state): State<AppState>,
    query: Result<Query<DowntimeQuery>, QueryRejection>,
) -> Result<Json<Vec<DowntimeEntry>>, AppError> {
    let Query(query) = query?;
    Ok(Json(state.aggregator.recent_downtime(query.limit).await?))
}
