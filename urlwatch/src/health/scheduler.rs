//! 定期チェックスケジューラー
//!
//! 設定されたURL群を一定間隔でオーケストレーターに渡す。

use crate::config::WatchConfig;
use crate::health::orchestrator::CheckOrchestrator;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

/// 定期チェックスケジューラー
#[derive(Clone)]
pub struct CheckScheduler {
    orchestrator: CheckOrchestrator,
    config: WatchConfig,
}

impl CheckScheduler {
    /// 新しいスケジューラーを作成
    pub fn new(orchestrator: CheckOrchestrator, config: WatchConfig) -> Self {
        Self {
            orchestrator,
            config,
        }
    }

    /// バックグラウンドで監視を開始
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.monitor_loop().await;
        })
    }

    /// 監視ループ
    async fn monitor_loop(&self) {
        let mut timer = interval(self.config.interval);
        // 1バッチが間隔を超えても、追いつくための連続実行はしない
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_secs = self.config.interval.as_secs_f64(),
            urls = self.config.urls.len(),
            "Check scheduler started"
        );

        loop {
            // 初回のtickは即時に完了するため、起動直後に1バッチ実行される
            timer.tick().await;
            self.run_once().await;
        }
    }

    /// 1バッチ実行する（エラーはログのみ）
    pub async fn run_once(&self) {
        if let Err(e) = self.orchestrator.check_all(&self.config.urls).await {
            error!("Scheduled check error: {}", e);
        }
    }
}
