use crate::domain::store::ArticleStore;
use crate::domain::user::{User, UserRole};
use crate::infra::storage::KeyValueStorage;
use crate::types::error::{StoreError, StoreResult};
use crate::types::keys;

/// ログインセッションの管理コラボレータ
///
/// ストアとは別の、セッションスコープのストレージに
/// ログイン中ユーザー（JSON）と選択ロール（生文字列）を保持する。
/// 認証は行わない。メールアドレスとロールの自己申告をそのまま信じる。
pub struct Session {
    storage: Box<dyn KeyValueStorage>,
}

impl Session {
    pub fn new<S: KeyValueStorage + 'static>(storage: S) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// メールアドレスとロールでログインする
    ///
    /// ストアに登録済みのメールならそのユーザーを、未知のメールなら
    /// 一時的な読者アカウントを作成してストアに追加する。
    /// セッションには実際のユーザーと、フォームで選択されたロールを保存する。
    pub fn login(
        &self,
        store: &mut ArticleStore,
        email: &str,
        role: UserRole,
    ) -> StoreResult<User> {
        let user = match store.get_user_by_email(email).cloned() {
            Some(user) => user,
            None => store.add_user(User::transient(email, role))?,
        };

        let payload = serde_json::to_string(&user)
            .map_err(|e| StoreError::json("セッションユーザーのシリアライズ", e))?;
        self.storage.save(keys::SESSION_USER, &payload)?;
        self.storage.save(keys::SESSION_ROLE, role.as_str())?;
        Ok(user)
    }

    /// ログイン中のユーザーを返す（未ログインならNone）
    pub fn current_user(&self) -> StoreResult<Option<User>> {
        match self.storage.load(keys::SESSION_USER)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::json("セッションユーザーの解析", e)),
            None => Ok(None),
        }
    }

    /// ログイン時に選択されたロールを返す（未ログインならNone）
    pub fn current_role(&self) -> StoreResult<Option<UserRole>> {
        match self.storage.load(keys::SESSION_ROLE)? {
            // ロールは生文字列で保存されている
            Some(raw) => Ok(raw.parse().ok()),
            None => Ok(None),
        }
    }

    /// ログアウトしてセッションキーを削除する
    pub fn logout(&self) -> StoreResult<()> {
        self.storage.remove(keys::SESSION_USER)?;
        self.storage.remove(keys::SESSION_ROLE)
    }
}
