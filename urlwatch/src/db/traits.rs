//! Repository traitパターン定義
//!
//! Observation Store の操作を抽象化し、フラップ検出・メトリクス集計を
//! ストレージ実装から切り離す。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::common::error::MonitorResult;
use crate::types::{CheckStatus, DowntimeEntry, Observation};

/// 追記専用の監視結果ストアのRepository trait
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// 監視結果を1件追記し、採番されたIDを返す
    async fn append(&self, observation: &Observation) -> MonitorResult<i64>;

    /// URLの最新ステータス（未チェックなら`None`）
    async fn latest_status(&self, url: &str) -> MonitorResult<Option<CheckStatus>>;

    /// URLの直近`limit`件（新しい順）
    async fn recent(&self, url: &str, limit: u32) -> MonitorResult<Vec<Observation>>;

    /// `checked_at`が`[start, end]`に含まれる監視結果（古い順）
    async fn in_range(
        &self,
        url: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MonitorResult<Vec<Observation>>;

    /// これまでにチェックされた全URL（重複なし・昇順）
    async fn distinct_urls(&self) -> MonitorResult<Vec<String>>;

    /// ダウン継続中のURLと、その連続区間の開始日時（開始が新しい順）
    async fn grouped_downtime(&self, limit: u32) -> MonitorResult<Vec<DowntimeEntry>>;

    /// 全URL横断の直近`limit`件（新しい順）
    async fn history(&self, limit: u32) -> MonitorResult<Vec<Observation>>;
}
