//! フラップ検出
//!
//! 直近N件の監視結果で、隣接するステータスが切り替わった回数を数える。
//! 比較は完全一致で行うため、`DOWN (Timeout)` → `DOWN (Connection Error)` も
//! 1回の切り替わりとして数える。

use crate::common::error::MonitorResult;
use crate::config::FlapConfig;
use crate::db::ObservationRepository;
use crate::types::CheckStatus;
use std::sync::Arc;
use tracing::debug;

/// フラップ検出器
#[derive(Clone)]
pub struct FlapDetector {
    repository: Arc<dyn ObservationRepository>,
    config: FlapConfig,
}

impl FlapDetector {
    /// 新しい検出器を作成
    pub fn new(repository: Arc<dyn ObservationRepository>, config: FlapConfig) -> Self {
        Self { repository, config }
    }

    /// URLがフラップしているか判定
    pub async fn is_flapping(&self, url: &str) -> MonitorResult<bool> {
        let recent = self.repository.recent(url, self.config.window).await?;
        let statuses: Vec<CheckStatus> = recent.iter().map(|o| o.status).collect();

        if statuses.len() < 2 {
            return Ok(false);
        }

        let flips = count_flips(&statuses);
        debug!(url = %url, flips, window = statuses.len(), "Flap flips counted");

        Ok(flips >= self.config.threshold)
    }
}

/// 隣接ペアのうちステータスが異なる数
pub fn count_flips(statuses: &[CheckStatus]) -> usize {
    statuses.windows(2).filter(|pair| pair[0] != pair[1]).count()
}
