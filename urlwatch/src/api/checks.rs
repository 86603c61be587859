//! チェック実行・履歴API
//!
//! `POST /check` と `GET /history` を提供する。

use super::error::AppError;
use super::validate_urls;
use crate::types::{CheckResult, Observation};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;

const DEFAULT_HISTORY_LIMIT: u32 = 100;

/// URL一覧を受け取るリクエストボディ
#[derive(Debug, Clone, Deserialize)]
pub struct UrlListRequest {
    /// 対象URL（絶対URL、http/httpsのみ）
    pub urls: Vec<String>,
}

/// 履歴取得クエリパラメーター
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    /// 取得件数
    #[serde(default = "default_history_limit")]
    pub limit: u32,
}

fn default_history_limit() -> u32 {
    DEFAULT_HISTORY_LIMIT
}

/// POST /check
pub async fn check_urls(
    State(state): State<AppState>,
    request: Result<Json<UrlListRequest>, JsonRejection>,
) -> Result<Json<Vec<CheckResult>>, AppError> {
    let Json(request) = request?;
    validate_urls(&request.urls)?;
    let results = state.orchestrator.check_all(&request.urls).await?;
    Ok(Json(results))
}

/// GET /history
pub async fn get_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<Observation>>, AppError> {
    let Query(query) = query?;
    let history = state.observations.history(query.limit).await?;
    Ok(Json(history))
}
