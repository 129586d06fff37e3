use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ユーザーのロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Editor,
    Author,
    Reader,
}

/// ロール別の遷移先ポータル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    /// 管理者向けレビューコンソール
    Admin,
    /// 著者・編集者向けクリエイターポータル
    Creator,
    /// 読者向けホームフィード
    Home,
}

impl UserRole {
    /// セッション保存用の小文字文字列を返す
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Editor => "editor",
            UserRole::Author => "author",
            UserRole::Reader => "reader",
        }
    }

    /// ログイン後の遷移先ポータルを返す
    pub fn portal(self) -> Portal {
        match self {
            UserRole::Admin => Portal::Admin,
            UserRole::Author | UserRole::Editor => Portal::Creator,
            UserRole::Reader => Portal::Home,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "editor" => Ok(UserRole::Editor),
            "author" => Ok(UserRole::Author),
            "reader" => Ok(UserRole::Reader),
            other => Err(format!("未知のロールです: {}", other)),
        }
    }
}

/// ユーザーエンティティ
///
/// `articles` と `followers` は非正規化カウンタ。
/// `articles` はストアが記事の追加・削除のたびに再計算するキャッシュ、
/// `followers` は読者設定コラボレータの領分でストアは触れない。
/// 一時ユーザーにはbio等が無いためserdeデフォルトで補完する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub articles: u64,
    #[serde(default)]
    pub followers: u64,
}

impl User {
    /// 未登録メールのログインから一時的な読者アカウントを作成する
    ///
    /// IDは現在時刻のUnixミリ秒、名前はメールのローカル部。
    pub fn transient(email: &str, role: UserRole) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            id: Utc::now().timestamp_millis(),
            name,
            email: email.to_string(),
            role,
            avatar: "https://i.pravatar.cc/150?img=8".to_string(),
            bio: String::new(),
            articles: 0,
            followers: 0,
        }
    }

    /// プレミアム購読の登録から読者アカウントを作成する
    pub fn from_subscription(name: &str, email: &str) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            name: name.to_string(),
            email: email.to_string(),
            role: UserRole::Reader,
            avatar: format!(
                "https://ui-avatars.com/api/?name={}&background=DC143C&color=fff",
                name.replace(' ', "+")
            ),
            bio: String::new(),
            articles: 0,
            followers: 0,
        }
    }
}
