//! URL uptime monitor
//!
//! URLを定期的・またはリクエストに応じてチェックし、履歴から稼働率・
//! ダウンタイム・フラップを算出するサーバー

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// REST APIハンドラー
pub mod api;

/// URLカテゴリ分類
pub mod classify;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// URLチェック・フラップ検出・オーケストレーション
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 稼働率・ダウンタイム集計
pub mod metrics;

/// 動作確認用モックターゲット
pub mod mock;

/// axumサーバー起動・シャットダウンハンドリング
pub mod server;

/// 型定義
pub mod types;

use std::sync::Arc;

use common::error::MonitorResult;
use config::AppConfig;
use db::{ObservationRepository, ObservationStorage};
use health::{CheckOrchestrator, FlapDetector, UrlChecker};

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 監視結果ストア
    pub observations: Arc<dyn ObservationRepository>,
    /// チェックオーケストレーター
    pub orchestrator: CheckOrchestrator,
    /// メトリクス集計器
    pub aggregator: metrics::MetricsAggregator,
    /// URL分類器
    pub classifier: Arc<dyn classify::UrlClassifier>,
    /// モックターゲットの状態
    pub mock_switch: Arc<dyn mock::MockSwitch>,
}

impl AppState {
    /// 接続プールと設定から各コンポーネントを組み立てる
    pub fn build(db_pool: sqlx::SqlitePool, config: &AppConfig) -> MonitorResult<Self> {
        let observations: Arc<dyn ObservationRepository> =
            Arc::new(ObservationStorage::new(db_pool));

        let checker = UrlChecker::new(&config.checker)?;
        let flap_detector = FlapDetector::new(observations.clone(), config.flap);
        let orchestrator = CheckOrchestrator::new(
            checker,
            observations.clone(),
            flap_detector,
            config.checker.max_concurrency,
        );
        let aggregator = metrics::MetricsAggregator::new(observations.clone());
        let classifier = Arc::new(classify::HuggingFaceClassifier::new(&config.classifier)?);

        Ok(Self {
            observations,
            orchestrator,
            aggregator,
            classifier,
            mock_switch: Arc::new(mock::InMemoryMockSwitch::new()),
        })
    }
}
