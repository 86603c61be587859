//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `MonitorError`は`external_message()`と`status_code()`メソッドを提供し、
//! 内部情報を漏らさないHTTPエラーレスポンスを生成できます。

use axum::http::StatusCode;
use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// monitor error type
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Unsupported uptime period
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Timeout error
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MonitorError {
    /// Returns a safe error message for external clients.
    ///
    /// The `Display` implementation carries the full detail (SQL errors,
    /// upstream hosts) and belongs in server logs only.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Common(CommonError::Validation(_)) => "Invalid request",
            Self::Common(_) => "Request error",
            Self::InvalidPeriod(_) => "Invalid period. Supported values: 24h, 7d, 30d",
            Self::Database(_) => "Database error",
            Self::Http(_) => "Backend service unavailable",
            Self::Timeout(_) => "Request timeout",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Common(CommonError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Common(CommonError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Common(_) => StatusCode::BAD_REQUEST,
            Self::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for MonitorError {
    fn from(err: sqlx::Error) -> Self {
        MonitorError::Database(err.to_string())
    }
}

/// Result type alias (monitor)
pub type MonitorResult<T> = Result<T, MonitorError>;
