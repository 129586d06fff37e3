pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::types::error::StoreResult;

/// キーバリューストレージの抽象化トレイト
///
/// このトレイトは、ファイルベースの本番実装とテスト用の
/// インメモリ実装を統一的に扱えるようにするためのインターフェースです。
/// ブラウザ版のlocalStorageに相当し、値は常にテキストブロブです。
pub trait KeyValueStorage {
    /// 指定されたキーの値を読み込む（存在しなければNone）
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// 指定されたキーに値を保存する（既存値は全置換）
    fn save(&self, key: &str, value: &str) -> StoreResult<()>;

    /// 指定されたキーを削除する（存在しなくてもエラーにしない）
    fn remove(&self, key: &str) -> StoreResult<()>;
}
