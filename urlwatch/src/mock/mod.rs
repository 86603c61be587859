//! 動作確認用のモックターゲット
//!
//! プロセス内のフラグでUP/DOWNを切り替えられるエンドポイントの状態。
//! 永続化はしない。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// モックターゲットの状態スイッチ
pub trait MockSwitch: Send + Sync {
    /// 現在UPかどうか
    fn is_up(&self) -> bool;

    /// 状態を反転し、反転後の状態（UPなら`true`）を返す
    fn toggle(&self) -> bool;
}

/// メモリ上のスイッチ（初期状態はUP）
#[derive(Debug, Clone)]
pub struct InMemoryMockSwitch {
    up: Arc<AtomicBool>,
}

impl Default for InMemoryMockSwitch {
    fn default() -> Self {
        Self {
            up: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl InMemoryMockSwitch {
    /// UP状態のスイッチを作成
    pub fn new() -> Self {
        Self::default()
    }
}

impl MockSwitch for InMemoryMockSwitch {
    fn is_up(&self) -> bool {
        self.up.load(Ordering::SeqCst)
    }

    fn toggle(&self) -> bool {
        // fetch_xor は反転前の値を返す
        !self.up.fetch_xor(true, Ordering::SeqCst)
    }
}
