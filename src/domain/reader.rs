use crate::domain::article::Article;
use crate::domain::store::ArticleStore;
use crate::infra::storage::KeyValueStorage;
use crate::types::error::{StoreError, StoreResult};
use crate::types::keys;
use std::collections::HashSet;

/// 読者設定のコラボレータ
///
/// フォロー中の著者IDと保存済み記事IDの集合を、ストア本体とは
/// 別のキー（JSON配列）で保持する。壊れたエントリはフェイルクローズで
/// 空集合から再スタートする。
pub struct ReaderPrefs {
    storage: Box<dyn KeyValueStorage>,
    followed: HashSet<i64>,
    saved: HashSet<i64>,
}

impl ReaderPrefs {
    /// ストレージから既存の集合を読み込んで作成する
    pub fn new<S: KeyValueStorage + 'static>(storage: S) -> StoreResult<Self> {
        let storage = Box::new(storage);
        let followed = load_id_set(storage.as_ref(), keys::FOLLOWED_AUTHORS)?;
        let saved = load_id_set(storage.as_ref(), keys::SAVED_STORIES)?;
        Ok(Self {
            storage,
            followed,
            saved,
        })
    }

    /// 著者のフォロー状態を反転し、新しい状態（フォロー中か）を返す
    pub fn toggle_follow(&mut self, author_id: i64) -> StoreResult<bool> {
        let now_following = if self.followed.contains(&author_id) {
            self.followed.remove(&author_id);
            false
        } else {
            self.followed.insert(author_id);
            true
        };
        self.persist(keys::FOLLOWED_AUTHORS, &self.followed)?;
        Ok(now_following)
    }

    pub fn is_following(&self, author_id: i64) -> bool {
        self.followed.contains(&author_id)
    }

    /// 記事の保存状態を反転し、新しい状態（保存済みか）を返す
    pub fn toggle_save(&mut self, article_id: i64) -> StoreResult<bool> {
        let now_saved = if self.saved.contains(&article_id) {
            self.saved.remove(&article_id);
            false
        } else {
            self.saved.insert(article_id);
            true
        };
        self.persist(keys::SAVED_STORIES, &self.saved)?;
        Ok(now_saved)
    }

    pub fn is_saved(&self, article_id: i64) -> bool {
        self.saved.contains(&article_id)
    }

    /// フォロー中の著者数
    pub fn followed_count(&self) -> usize {
        self.followed.len()
    }

    /// フォロー中の著者による公開済み記事を、ストアの順序のまま返す
    pub fn followed_feed<'a>(&self, store: &'a ArticleStore) -> Vec<&'a Article> {
        store
            .get_articles()
            .iter()
            .filter(|a| a.is_published() && self.followed.contains(&a.author_id))
            .collect()
    }

    /// 両集合を空にしてキーを削除する（ログアウト経路）
    pub fn clear(&mut self) -> StoreResult<()> {
        self.followed.clear();
        self.saved.clear();
        self.storage.remove(keys::FOLLOWED_AUTHORS)?;
        self.storage.remove(keys::SAVED_STORIES)
    }

    fn persist(&self, key: &str, set: &HashSet<i64>) -> StoreResult<()> {
        // 安定した出力のためソートして保存する
        let mut ids: Vec<i64> = set.iter().copied().collect();
        ids.sort_unstable();
        let payload = serde_json::to_string(&ids)
            .map_err(|e| StoreError::json(format!("{}のシリアライズ", key), e))?;
        self.storage.save(key, &payload)
    }
}

/// JSON配列のキーをID集合として読み込む（壊れていれば空集合）
fn load_id_set(storage: &dyn KeyValueStorage, key: &str) -> StoreResult<HashSet<i64>> {
    match storage.load(key)? {
        Some(raw) => match serde_json::from_str::<Vec<i64>>(&raw) {
            Ok(ids) => Ok(ids.into_iter().collect()),
            Err(e) => {
                eprintln!("{}が壊れているため空集合から再開します: {}", key, e);
                Ok(HashSet::new())
            }
        },
        None => Ok(HashSet::new()),
    }
}
