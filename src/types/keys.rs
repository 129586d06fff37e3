//! 永続化ストレージのキー名定義
//!
//! すべてのブロブはJSONエンコードされたテキストとして保存されます。
//! ストア本体とコラボレータ（セッション・読者設定・購読）は
//! それぞれ独立したキーを所有し、互いのキーには触れません。

/// 記事コレクション（ストア所有）
pub const ARTICLES: &str = "kcc_articles";

/// ユーザーコレクション（ストア所有）
pub const USERS: &str = "kcc_users";

/// フォロー中の著者IDリスト（読者設定コラボレータ所有）
pub const FOLLOWED_AUTHORS: &str = "kcc_followed_authors";

/// 保存済み記事IDリスト（読者設定コラボレータ所有）
pub const SAVED_STORIES: &str = "kcc_saved_stories";

/// ニュースレター購読者リスト（購読コラボレータ所有）
pub const SUBSCRIBERS: &str = "kcc_subscribers";

/// ログイン中ユーザー（セッションコラボレータ所有、ログアウトで削除）
pub const SESSION_USER: &str = "kcc_user";

/// ログイン時に選択されたロール文字列（セッションコラボレータ所有）
pub const SESSION_ROLE: &str = "kcc_role";
