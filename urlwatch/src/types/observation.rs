//! 監視結果（Observation）の型定義
//!
//! ステータスは `Up | Down(理由)` のタグ付き値として扱い、
//! `"UP"` / `"DOWN (Timeout)"` などの表示文字列は都度導出する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// ダウン理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownReason {
    /// 200以外のHTTPステータスを受信
    HttpStatus(u16),
    /// 接続確立に失敗（DNS・接続拒否・到達不能）
    ConnectionError,
    /// タイムアウト
    Timeout,
    /// その他の失敗
    Other,
    /// 理由の記録がない旧形式（`"DOWN"`）
    Unspecified,
}

/// 1回のチェック結果ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CheckStatus {
    /// 稼働中（HTTP 200）
    Up,
    /// 停止中
    Down(DownReason),
}

impl CheckStatus {
    /// 稼働中かどうか
    pub fn is_up(&self) -> bool {
        matches!(self, CheckStatus::Up)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Up => f.write_str("UP"),
            CheckStatus::Down(DownReason::Unspecified) => f.write_str("DOWN"),
            CheckStatus::Down(DownReason::HttpStatus(code)) => write!(f, "DOWN ({})", code),
            CheckStatus::Down(DownReason::ConnectionError) => f.write_str("DOWN (Connection Error)"),
            CheckStatus::Down(DownReason::Timeout) => f.write_str("DOWN (Timeout)"),
            CheckStatus::Down(DownReason::Other) => f.write_str("DOWN (Error)"),
        }
    }
}

/// ステータス文字列の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for CheckStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UP" => return Ok(CheckStatus::Up),
            "DOWN" => return Ok(CheckStatus::Down(DownReason::Unspecified)),
            _ => {}
        }

        let detail = s
            .strip_prefix("DOWN (")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseStatusError(s.to_string()))?;

        let reason = match detail {
            "Connection Error" => DownReason::ConnectionError,
            "Timeout" => DownReason::Timeout,
            "Error" => DownReason::Other,
            code => code
                .parse::<u16>()
                .map(DownReason::HttpStatus)
                .map_err(|_| ParseStatusError(s.to_string()))?,
        };

        Ok(CheckStatus::Down(reason))
    }
}

impl From<CheckStatus> for String {
    fn from(status: CheckStatus) -> Self {
        status.to_string()
    }
}

impl TryFrom<String> for CheckStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 1つのURLに対する1回の監視記録（作成後は不変）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// チェック対象URL
    pub url: String,
    /// ステータス
    pub status: CheckStatus,
    /// 応答時間（ミリ秒）。応答を受信した場合のみ
    pub response_time: Option<f64>,
    /// チェック完了日時（UTC）
    #[serde(with = "crate::types::timestamp")]
    pub checked_at: DateTime<Utc>,
}

impl Observation {
    /// 現在時刻でObservationを作成
    pub fn new(url: impl Into<String>, status: CheckStatus, response_time: Option<f64>) -> Self {
        Self {
            url: url.into(),
            status,
            response_time,
            checked_at: crate::types::timestamp::now(),
        }
    }
}

/// `POST /check` の1件分の結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// チェック対象URL
    pub url: String,
    /// ステータス
    pub status: CheckStatus,
    /// 応答時間（ミリ秒）
    pub response_time: Option<f64>,
    /// チェック完了日時（UTC）
    #[serde(with = "crate::types::timestamp")]
    pub checked_at: DateTime<Utc>,
    /// 直近の履歴でフラップ（不安定）が検出されたか
    pub response_time_anomaly: bool,
}

impl CheckResult {
    /// Observationとフラップ判定結果から組み立てる
    pub fn from_observation(observation: Observation, anomaly: bool) -> Self {
        Self {
            url: observation.url,
            status: observation.status,
            response_time: observation.response_time,
            checked_at: observation.checked_at,
            response_time_anomaly: anomaly,
        }
    }
}

/// 継続中のダウン期間
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeEntry {
    /// 対象URL
    pub url: String,
    /// 現在のダウン連続区間の開始日時
    #[serde(with = "crate::types::timestamp")]
    pub down_since: DateTime<Utc>,
}
