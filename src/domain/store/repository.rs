use super::seed;
use super::stats::{compute_author_stats, compute_store_stats, AuthorStats, StoreStats};
use crate::domain::article::{
    filter_articles_by_status, Article, ArticleDraft, ArticlePatch, ArticleStatus,
};
use crate::domain::user::User;
use crate::infra::storage::KeyValueStorage;
use crate::types::error::{StoreError, StoreResult};
use crate::types::keys;
use chrono::Local;

/// 記事・ユーザーコレクションの唯一の所有者
///
/// すべての変更操作はこのストアを経由するため、永続化と
/// 派生統計の整合性が保たれる。変更操作は成功のたびに
/// 両コレクションをストレージへ全量シリアライズする。
pub struct ArticleStore {
    articles: Vec<Article>,
    users: Vec<User>,
    storage: Box<dyn KeyValueStorage>,
}

impl ArticleStore {
    /// 埋め込みシードで初期化し、永続化済みデータがあればそれで置き換える
    pub fn new<S: KeyValueStorage + 'static>(storage: S) -> StoreResult<Self> {
        let seed = seed::load_seed()?;
        let mut store = Self::with_seed(storage, seed.articles, seed.users);
        store.load_from_storage();
        Ok(store)
    }

    /// 任意のシードコレクションでストアを作成する（テスト・カスタム配備用）
    ///
    /// こちらは永続化済みデータの読み込みを行わない。
    pub fn with_seed<S: KeyValueStorage + 'static>(
        storage: S,
        articles: Vec<Article>,
        users: Vec<User>,
    ) -> Self {
        Self {
            articles,
            users,
            storage: Box::new(storage),
        }
    }

    // --- クエリ操作 ---

    /// 全記事を挿入順で返す（日付順・閲覧数順は保証しない）
    pub fn get_articles(&self) -> &[Article] {
        &self.articles
    }

    /// IDで記事を検索する
    pub fn get_article_by_id(&self, id: i64) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// 指定著者の記事を元の順序を保って返す
    pub fn get_articles_by_author(&self, author_id: i64) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| a.author_id == author_id)
            .collect()
    }

    /// 指定ステータスの記事を元の順序を保って返す
    pub fn get_articles_by_status(&self, status: ArticleStatus) -> Vec<&Article> {
        filter_articles_by_status(&self.articles, status)
    }

    /// 全ユーザーを返す
    pub fn get_users(&self) -> &[User] {
        &self.users
    }

    /// IDでユーザーを検索する
    pub fn get_user_by_id(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// メールアドレスでユーザーを検索する（大文字小文字を区別する完全一致）
    pub fn get_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    // --- 変更操作 ---

    /// 新しい記事を追加する
    ///
    /// IDは既存IDの最大値+1（空なら1）。カウンタと公開日は
    /// 入力で上書きされない限りデフォルト（0 / 0 / null）になる。
    pub fn add_article(&mut self, draft: ArticleDraft) -> StoreResult<Article> {
        // コレクションが空のときは最大値を0とみなす
        let new_id = self.articles.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let article = Article {
            id: new_id,
            title: draft.title,
            author: draft.author,
            author_id: draft.author_id,
            status: draft.status,
            category: draft.category,
            views: draft.views.unwrap_or(0),
            engagement: draft.engagement.unwrap_or(0),
            publish_date: draft.publish_date,
            image: draft.image,
            summary: draft.summary,
            content: draft.content,
        };
        let created = article.clone();
        self.articles.push(article);
        self.refresh_author_article_count(created.author_id);
        self.save_to_storage()?;
        Ok(created)
    }

    /// 記事をフィールド単位で部分更新する
    ///
    /// ステータスはパッチに含まれない。遷移は `update_article_status` 経由。
    pub fn update_article(&mut self, id: i64, patch: ArticlePatch) -> StoreResult<Article> {
        let idx = self
            .articles
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::article_not_found(id))?;
        patch.apply_to(&mut self.articles[idx]);
        self.save_to_storage()?;
        Ok(self.articles[idx].clone())
    }

    /// 記事のステータスを遷移させる
    ///
    /// 遷移の正当性はストアが所有する（`ArticleStatus::can_transition_to`）。
    /// 同一ステータスへの設定は何もしない。初めてpublishedに到達したとき
    /// ローカルの暦日を公開日として記録し、以後は上書きしない。
    pub fn update_article_status(
        &mut self,
        id: i64,
        new_status: ArticleStatus,
    ) -> StoreResult<Article> {
        let idx = self
            .articles
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::article_not_found(id))?;
        let current = self.articles[idx].status;

        if current == new_status {
            return Ok(self.articles[idx].clone());
        }
        if !current.can_transition_to(new_status) {
            return Err(StoreError::invalid_transition(current, new_status));
        }

        {
            let article = &mut self.articles[idx];
            article.status = new_status;
            if new_status == ArticleStatus::Published && article.publish_date.is_none() {
                article.publish_date = Some(Local::now().date_naive());
            }
        }
        self.save_to_storage()?;
        Ok(self.articles[idx].clone())
    }

    /// 記事を完全に削除する（レビューの却下経路、復元なし）
    pub fn delete_article(&mut self, id: i64) -> StoreResult<()> {
        let idx = self
            .articles
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::article_not_found(id))?;
        let removed = self.articles.remove(idx);
        self.refresh_author_article_count(removed.author_id);
        self.save_to_storage()
    }

    /// ユーザーを追加する（ログイン・購読コラボレータの登録経路）
    pub fn add_user(&mut self, user: User) -> StoreResult<User> {
        self.users.push(user.clone());
        self.save_to_storage()?;
        Ok(user)
    }

    // --- 統計操作 ---

    /// ストア全体の集計統計（毎回メモリ上の状態から再計算）
    pub fn get_stats(&self) -> StoreStats {
        compute_store_stats(&self.articles, &self.users)
    }

    /// 著者単位の集計統計
    pub fn get_author_stats(&self, author_id: i64) -> AuthorStats {
        compute_author_stats(&self.get_articles_by_author(author_id))
    }

    // --- 永続化 ---

    /// 両コレクションをJSONブロブとしてストレージへ保存する
    pub fn save_to_storage(&self) -> StoreResult<()> {
        let articles = serde_json::to_string(&self.articles)
            .map_err(|e| StoreError::json("記事コレクションのシリアライズ", e))?;
        let users = serde_json::to_string(&self.users)
            .map_err(|e| StoreError::json("ユーザーコレクションのシリアライズ", e))?;
        self.storage.save(keys::ARTICLES, &articles)?;
        self.storage.save(keys::USERS, &users)?;
        Ok(())
    }

    /// 永続化済みデータでメモリ上のコレクションを置き換える
    ///
    /// キーごとに独立して処理し、存在しないキーはシードのまま残す。
    /// 壊れたブロブはフェイルクローズ: 警告を出して破棄し、
    /// そのキーについてはシードを正とする。
    pub fn load_from_storage(&mut self) {
        match self.storage.load(keys::ARTICLES) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(articles) => self.articles = articles,
                Err(e) => eprintln!(
                    "保存済み記事データが壊れているためシードを使用します: {}",
                    e
                ),
            },
            Ok(None) => {}
            Err(e) => eprintln!("保存済み記事データの読み込みに失敗しました: {}", e),
        }

        match self.storage.load(keys::USERS) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(users) => self.users = users,
                Err(e) => eprintln!(
                    "保存済みユーザーデータが壊れているためシードを使用します: {}",
                    e
                ),
            },
            Ok(None) => {}
            Err(e) => eprintln!("保存済みユーザーデータの読み込みに失敗しました: {}", e),
        }
    }

    /// 著者の非正規化記事カウンタを再計算する
    ///
    /// `followers` は読者設定コラボレータの領分なのでここでは触れない。
    fn refresh_author_article_count(&mut self, author_id: i64) {
        let count = self
            .articles
            .iter()
            .filter(|a| a.author_id == author_id)
            .count() as u64;
        if let Some(user) = self.users.iter_mut().find(|u| u.id == author_id) {
            user.articles = count;
        }
    }
}
