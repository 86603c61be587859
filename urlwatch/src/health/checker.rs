//! URLチェッカー
//!
//! 1回のHTTP GETを実行し、結果をステータスと応答時間に分類する。
//! 内部状態は持たず、リトライも行わない。

use crate::common::error::{MonitorError, MonitorResult};
use crate::config::CheckerConfig;
use crate::types::{CheckStatus, DownReason, Observation};
use reqwest::{redirect, Client};
use std::time::Instant;
use tracing::{debug, warn};

/// URLチェッカー
#[derive(Clone)]
pub struct UrlChecker {
    /// HTTPクライアント（タイムアウト・User-Agent設定済み）
    client: Client,
}

impl UrlChecker {
    /// 新しいチェッカーを作成
    pub fn new(config: &CheckerConfig) -> MonitorResult<Self> {
        // リダイレクトは追跡せず、3xxはそのままDOWNとして記録する
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| MonitorError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// URLを1回チェックする
    ///
    /// 応答時間はリクエスト送信直前からレスポンスヘッダー受信までを計測する。
    /// ネットワーク障害はエラーにせず `DOWN (<理由>)` として返す。
    pub async fn check(&self, url: &str) -> Observation {
        let start = Instant::now();
        let result = self.client.get(url).send().await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let (status, response_time) = match result {
            Ok(response) => {
                let code = response.status().as_u16();
                debug!(
                    url = %url,
                    status_code = code,
                    response_time_ms = elapsed_ms,
                    "Check completed"
                );
                (classify_status_code(code), Some(elapsed_ms))
            }
            Err(err) => {
                let reason = classify_error(&err);
                warn!(url = %url, error = %err, reason = ?reason, "Check failed");
                (CheckStatus::Down(reason), None)
            }
        };

        Observation::new(url, status, response_time)
    }
}

/// HTTPステータスコードを分類（200のみUP）
fn classify_status_code(code: u16) -> CheckStatus {
    if code == 200 {
        CheckStatus::Up
    } else {
        CheckStatus::Down(DownReason::HttpStatus(code))
    }
}

/// 応答を受信できなかった失敗を分類
///
/// 接続確立中のタイムアウトもタイムアウトとして扱う。
fn classify_error(err: &reqwest::Error) -> DownReason {
    if err.is_timeout() {
        DownReason::Timeout
    } else if err.is_connect() {
        DownReason::ConnectionError
    } else {
        DownReason::Other
    }
}
