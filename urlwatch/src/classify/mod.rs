//! URLカテゴリ分類
//!
//! ゼロショット分類APIにURL文字列を渡し、最もスコアの高いラベルを返す。
//! 失敗はすべて `"unknown"` に縮退し、呼び出し元へはエラーを返さない。

use crate::common::error::{CommonError, MonitorError, MonitorResult};
use crate::config::ClassifierConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 分類できなかった場合のカテゴリ
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// 分類候補ラベル
pub const CANDIDATE_LABELS: [&str; 10] = [
    "news",
    "shopping",
    "social media",
    "technology",
    "health",
    "education",
    "finance",
    "entertainment",
    "travel",
    "sports",
];

/// 1件分の分類結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// 対象URL
    pub url: String,
    /// カテゴリ
    pub category: String,
}

/// URL分類器
#[async_trait]
pub trait UrlClassifier: Send + Sync {
    /// URLのカテゴリを返す（失敗時は`"unknown"`）
    async fn classify(&self, url: &str) -> String;
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters,
}

#[derive(Serialize)]
struct ZeroShotParameters {
    candidate_labels: &'static [&'static str],
}

#[derive(Deserialize)]
struct ZeroShotResponse {
    #[serde(default)]
    labels: Vec<String>,
}

/// Hugging Face Inference API を使う分類器
#[derive(Clone)]
pub struct HuggingFaceClassifier {
    client: Client,
    api_url: String,
    api_token: Option<String>,
}

impl HuggingFaceClassifier {
    /// 新しい分類器を作成
    pub fn new(config: &ClassifierConfig) -> MonitorResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MonitorError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        })
    }

    async fn request_top_label(&self, url: &str) -> MonitorResult<Option<String>> {
        let token = self.api_token.as_deref().ok_or_else(|| {
            MonitorError::Common(CommonError::Config(
                "classifier API token is not configured".to_string(),
            ))
        })?;

        let body = ZeroShotRequest {
            inputs: url,
            parameters: ZeroShotParameters {
                candidate_labels: &CANDIDATE_LABELS,
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MonitorError::Timeout(e.to_string())
                } else {
                    MonitorError::Http(e.to_string())
                }
            })?
            .error_for_status()
            .map_err(|e| MonitorError::Http(e.to_string()))?;

        let parsed: ZeroShotResponse = response
            .json()
            .await
            .map_err(|e| MonitorError::Http(format!("Malformed classifier response: {}", e)))?;

        Ok(parsed.labels.into_iter().next())
    }
}

#[async_trait]
impl UrlClassifier for HuggingFaceClassifier {
    async fn classify(&self, url: &str) -> String {
        match self.request_top_label(url).await {
            Ok(Some(label)) => {
                debug!(url = %url, category = %label, "URL classified");
                label
            }
            Ok(None) => UNKNOWN_CATEGORY.to_string(),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to classify URL");
                UNKNOWN_CATEGORY.to_string()
            }
        }
    }
}
