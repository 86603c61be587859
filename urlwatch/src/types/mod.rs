//! 型定義

/// 監視結果・ステータス
pub mod observation;
/// タイムスタンプの保存形式
pub mod timestamp;

pub use observation::{CheckResult, CheckStatus, DownReason, DowntimeEntry, Observation};
