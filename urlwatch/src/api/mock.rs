//! モックターゲットAPI
//!
//! 監視対象として自分自身を登録し、UP/DOWNを手動で切り替えるためのエンドポイント。

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// GET /mock-url
pub async fn get_mock_url(State(state): State<AppState>) -> impl IntoResponse {
    if state.mock_switch.is_up() {
        (
            StatusCode::OK,
            Json(json!({"message": "✅ Mock service is UP"})),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "💥 Mock service is DOWN"})),
        )
    }
}

/// POST /toggle-mock-url
pub async fn toggle_mock_url(State(state): State<AppState>) -> Json<serde_json::Value> {
    let up = state.mock_switch.toggle();
    tracing::info!(up, "Mock target toggled");
    Json(json!({"new_status": if up { "UP" } else { "DOWN" }}))
}
