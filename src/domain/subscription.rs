use crate::domain::store::ArticleStore;
use crate::domain::user::User;
use crate::infra::storage::KeyValueStorage;
use crate::types::error::{StoreError, StoreResult};
use crate::types::keys;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 購読プラン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Free,
    Premium,
}

/// ニュースレターの配信頻度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

/// 購読状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Unsubscribed,
}

/// ニュースレター購読レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub name: String,
    pub email: String,
    pub plan: SubscriptionPlan,
    pub frequency: Frequency,
    pub interests: Vec<String>,
    pub subscribed_at: DateTime<Utc>,
    pub status: SubscriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

impl Subscription {
    /// 現在時刻でアクティブな購読レコードを作成する
    pub fn new(
        name: &str,
        email: &str,
        plan: SubscriptionPlan,
        frequency: Frequency,
        interests: Vec<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            plan,
            frequency,
            interests,
            subscribed_at: Utc::now(),
            status: SubscriptionStatus::Active,
            unsubscribed_at: None,
        }
    }
}

/// 購読コラボレータ
///
/// `kcc_subscribers` キーに購読レコードの配列を保持する。
/// 同じメールでの再購読は追記ではなく置き換え。
pub struct SubscriptionBook {
    storage: Box<dyn KeyValueStorage>,
    subscribers: Vec<Subscription>,
}

impl SubscriptionBook {
    /// ストレージから既存の購読者リストを読み込んで作成する
    pub fn new<S: KeyValueStorage + 'static>(storage: S) -> StoreResult<Self> {
        let storage = Box::new(storage);
        let subscribers = match storage.load(keys::SUBSCRIBERS)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(subscribers) => subscribers,
                Err(e) => {
                    eprintln!("購読者データが壊れているため空から再開します: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Ok(Self {
            storage,
            subscribers,
        })
    }

    /// 購読を登録する（同一メールは置き換え）
    ///
    /// プレミアムプランで、かつストアに未登録のメールなら
    /// 読者アカウントをストアに作成する。
    pub fn subscribe(
        &mut self,
        store: &mut ArticleStore,
        subscription: Subscription,
    ) -> StoreResult<()> {
        match self
            .subscribers
            .iter_mut()
            .find(|s| s.email == subscription.email)
        {
            Some(existing) => *existing = subscription.clone(),
            None => self.subscribers.push(subscription.clone()),
        }
        self.persist()?;

        if subscription.plan == SubscriptionPlan::Premium
            && store.get_user_by_email(&subscription.email).is_none()
        {
            store.add_user(User::from_subscription(
                &subscription.name,
                &subscription.email,
            ))?;
        }
        Ok(())
    }

    /// メールアドレスで購読レコードを検索する
    pub fn subscriber_by_email(&self, email: &str) -> Option<&Subscription> {
        self.subscribers.iter().find(|s| s.email == email)
    }

    /// アクティブな購読が存在するかどうか
    pub fn is_subscribed(&self, email: &str) -> bool {
        self.subscriber_by_email(email)
            .map(|s| s.status == SubscriptionStatus::Active)
            .unwrap_or(false)
    }

    /// 購読を解除する（レコードは残し、状態と解除時刻を記録する）
    pub fn unsubscribe(&mut self, email: &str) -> StoreResult<bool> {
        match self.subscribers.iter_mut().find(|s| s.email == email) {
            Some(subscription) => {
                subscription.status = SubscriptionStatus::Unsubscribed;
                subscription.unsubscribed_at = Some(Utc::now());
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 購読者数
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    fn persist(&self) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.subscribers)
            .map_err(|e| StoreError::json("購読者リストのシリアライズ", e))?;
        self.storage.save(keys::SUBSCRIBERS, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::MemoryStorage;

    fn empty_store() -> ArticleStore {
        ArticleStore::with_seed(MemoryStorage::new(), vec![], vec![])
    }

    fn subscription(email: &str, plan: SubscriptionPlan) -> Subscription {
        Subscription::new(
            "Test Reader",
            email,
            plan,
            Frequency::Daily,
            vec!["Heritage".to_string()],
        )
    }

    #[test]
    fn test_subscribe_and_query() {
        let mut store = empty_store();
        let mut book = SubscriptionBook::new(MemoryStorage::new()).unwrap();

        book.subscribe(&mut store, subscription("reader@example.in", SubscriptionPlan::Free))
            .expect("購読登録に失敗");

        assert!(book.is_subscribed("reader@example.in"));
        assert!(!book.is_subscribed("other@example.in"));
        assert_eq!(book.len(), 1);

        println!("✅ 購読登録テスト成功");
    }

    #[test]
    fn test_resubscribe_replaces_not_appends() {
        let mut store = empty_store();
        let mut book = SubscriptionBook::new(MemoryStorage::new()).unwrap();

        book.subscribe(&mut store, subscription("reader@example.in", SubscriptionPlan::Free))
            .unwrap();
        let mut premium = subscription("reader@example.in", SubscriptionPlan::Premium);
        premium.frequency = Frequency::Weekly;
        book.subscribe(&mut store, premium).unwrap();

        // 件数は変わらず、内容が置き換わる
        assert_eq!(book.len(), 1);
        let record = book.subscriber_by_email("reader@example.in").unwrap();
        assert_eq!(record.plan, SubscriptionPlan::Premium);
        assert_eq!(record.frequency, Frequency::Weekly);

        println!("✅ 重複購読置き換えテスト成功");
    }

    #[test]
    fn test_premium_creates_reader_account() {
        let mut store = empty_store();
        let mut book = SubscriptionBook::new(MemoryStorage::new()).unwrap();

        // 無料プランではアカウントは作られない
        book.subscribe(&mut store, subscription("free@example.in", SubscriptionPlan::Free))
            .unwrap();
        assert!(store.get_user_by_email("free@example.in").is_none());

        // プレミアムで読者アカウントが作られる
        book.subscribe(
            &mut store,
            subscription("premium@example.in", SubscriptionPlan::Premium),
        )
        .unwrap();
        let user = store
            .get_user_by_email("premium@example.in")
            .expect("読者アカウントが作られていない");
        assert_eq!(user.role, crate::domain::user::UserRole::Reader);

        // 既存メールのプレミアム購読ではアカウントを重複作成しない
        let before = store.get_users().len();
        book.subscribe(
            &mut store,
            subscription("premium@example.in", SubscriptionPlan::Premium),
        )
        .unwrap();
        assert_eq!(store.get_users().len(), before);

        println!("✅ プレミアムアカウント作成テスト成功");
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = empty_store();
        let storage = MemoryStorage::new();
        let mut book = SubscriptionBook::new(storage.clone()).unwrap();
        book.subscribe(&mut store, subscription("reader@example.in", SubscriptionPlan::Free))
            .unwrap();

        assert!(book.unsubscribe("reader@example.in").unwrap());
        assert!(!book.unsubscribe("nobody@example.in").unwrap());

        // 解除後もレコードは残り、状態と解除時刻が記録される
        let record = book.subscriber_by_email("reader@example.in").unwrap();
        assert_eq!(record.status, SubscriptionStatus::Unsubscribed);
        assert!(record.unsubscribed_at.is_some());
        assert!(!book.is_subscribed("reader@example.in"));

        // 永続化されている
        let reloaded = SubscriptionBook::new(storage).unwrap();
        assert!(!reloaded.is_subscribed("reader@example.in"));

        println!("✅ 購読解除テスト成功");
    }
}
