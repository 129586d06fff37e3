//! 型定義モジュール
//!
//! アプリケーション全体で使用される共通的な型定義を管理します。
//! - エラー型: ストア操作の失敗の統一表現
//! - ストレージキー: 永続化ブロブのキー名定義

pub mod error;
pub mod keys;

// 便利な再エクスポート
pub use error::{StoreError, StoreResult};
