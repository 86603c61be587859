//! REST APIハンドラー
//!
//! 監視・集計・分類・モックターゲットの各エンドポイントを1つのRouterにまとめる。

pub mod checks;
pub mod classify;
pub mod error;
pub mod metrics;
pub mod mock;

use crate::common::error::{CommonError, MonitorError, MonitorResult};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Url;
use tower_http::trace::TraceLayer;

/// アプリケーションのRouterを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/check", post(checks::check_urls))
        .route("/history", get(checks::get_history))
        .route("/health", get(metrics::get_health))
        .route("/metrics/*url", get(metrics::get_uptime))
        .route("/recent_downtime", get(metrics::get_recent_downtime))
        .route("/classify", post(classify::classify_urls))
        .route("/mock-url", get(mock::get_mock_url))
        .route("/toggle-mock-url", post(mock::toggle_mock_url))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// すべてのURLが絶対URL（http/https、ホストあり）であることを確認する
///
/// 1件でも不正なら何も処理せずにエラーを返す。URL文字列は正規化しない。
pub(crate) fn validate_urls(urls: &[String]) -> MonitorResult<()> {
    for raw in urls {
        let valid = Url::parse(raw)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
            .unwrap_or(false);
        if !valid {
            return Err(MonitorError::Common(CommonError::Validation(format!(
                "not an absolute http(s) URL: {}",
                raw
            ))));
        }
    }
    Ok(())
}
