//! POST /classify

use super::checks::UrlListRequest;
use super::error::AppError;
use super::validate_urls;
use crate::classify::Classification;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use futures::{stream, StreamExt};

/// 分類APIへの同時リクエスト数
const CLASSIFY_CONCURRENCY: usize = 4;

/// URLごとのカテゴリを入力順で返す
pub async fn classify_urls(
    State(state): State<AppState>,
    request: Result<Json<UrlListRequest>, JsonRejection>,
) -> Result<Json<Vec<Classification>>, AppError> {
    let Json(request) = request?;
    validate_urls(&request.urls)?;

    let classifier = state.classifier.clone();
    let results = stream::iter(request.urls)
        .map(|url| {
            let classifier = classifier.clone();
            async move {
                let category = classifier.classify(&url).await;
                Classification { url, category }
            }
        })
        .buffered(CLASSIFY_CONCURRENCY)
        .collect::<Vec<_>>()
        .await;

    Ok(Json(results))
}
