use super::KeyValueStorage;
use crate::types::error::StoreResult;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// テスト用のインメモリキーバリューストレージ
///
/// この実装はテスト時にDIされ、ファイルシステムに触れずに
/// 永続化の振る舞いを検証できます。クローンは同じエントリ表を
/// 共有するため、保存→別インスタンスで再読込という
/// ラウンドトリップの検証にも使えます。
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// 空のインメモリストレージを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 事前にエントリを仕込む（永続化済みデータの再現用）
    pub fn seed_entry(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// 保持しているエントリ数を返す
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// エントリが空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
