//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// データベースマイグレーション
pub mod migrations;

/// 監視結果ストレージ
pub mod observations;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;

pub use observations::ObservationStorage;
pub use traits::ObservationRepository;
