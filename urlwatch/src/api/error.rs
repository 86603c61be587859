//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::{CommonError, MonitorError};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, warn};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub MonitorError);

impl From<MonitorError> for AppError {
    fn from(err: MonitorError) -> Self {
        AppError(err)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(MonitorError::Common(CommonError::Validation(
            rejection.body_text(),
        )))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(MonitorError::Common(CommonError::Validation(
            rejection.body_text(),
        )))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // クライアントには external_message() のみ返し、詳細はログに残す
        let status = self.0.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        }

        let payload = json!({
            "error": self.0.external_message()
        });

        (status, Json(payload)).into_response()
    }
}
