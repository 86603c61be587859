//! チェックオーケストレーター
//!
//! URLごとに「チェック → 記録 → フラップ判定」を実行する。
//! URL間は上限付きで並行処理し、結果は入力順で返す。

use crate::common::error::MonitorResult;
use crate::db::ObservationRepository;
use crate::health::checker::UrlChecker;
use crate::health::flap::FlapDetector;
use crate::types::CheckResult;
use futures::{stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info};

/// チェックオーケストレーター
#[derive(Clone)]
pub struct CheckOrchestrator {
    checker: UrlChecker,
    repository: Arc<dyn ObservationRepository>,
    flap_detector: FlapDetector,
    max_concurrency: usize,
}

impl CheckOrchestrator {
    /// 新しいオーケストレーターを作成
    pub fn new(
        checker: UrlChecker,
        repository: Arc<dyn ObservationRepository>,
        flap_detector: FlapDetector,
        max_concurrency: usize,
    ) -> Self {
        Self {
            checker,
            repository,
            flap_detector,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// URL群を1バッチとしてチェックする
    ///
    /// プローブ失敗はDOWNとして結果に含まれる。記録またはフラップ判定で
    /// ストレージエラーが発生した場合はバッチ全体がエラーになる。
    pub async fn check_all(&self, urls: &[String]) -> MonitorResult<Vec<CheckResult>> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        let concurrency = urls.len().min(self.max_concurrency);
        debug!(batch = urls.len(), concurrency, "Starting check batch");

        let results: Vec<CheckResult> = stream::iter(urls.iter().cloned())
            .map(|url| async move { self.check_one(&url).await })
            .buffered(concurrency)
            .try_collect()
            .await?;

        let down = results.iter().filter(|r| !r.status.is_up()).count();
        info!(total = results.len(), down, "Check batch completed");

        Ok(results)
    }

    async fn check_one(&self, url: &str) -> MonitorResult<CheckResult> {
        let observation = self.checker.check(url).await;
        self.repository.append(&observation).await?;
        // 記録後に判定するため、今回の結果もウィンドウに含まれる
        let anomaly = self.flap_detector.is_flapping(url).await?;
        Ok(CheckResult::from_observation(observation, anomaly))
    }
}
