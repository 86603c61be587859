//! URL監視
//!
//! 1回のHTTPプローブ、フラップ検出、バッチ実行、定期実行を提供する。
//! 書き込みを行うのはオーケストレーターのみ。

pub mod checker;
pub mod flap;
pub mod orchestrator;
pub mod scheduler;

pub use checker::UrlChecker;
pub use flap::FlapDetector;
pub use orchestrator::CheckOrchestrator;
pub use scheduler::CheckScheduler;
