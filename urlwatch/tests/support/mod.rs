//! 統合テスト共通ヘルパー
