use crate::domain::article::{count_articles_by_status, Article};
use crate::domain::user::{User, UserRole};
use serde::Serialize;

/// ストア全体の集計統計
///
/// キャッシュは持たず、呼び出しのたびに現在のメモリ上の状態から再計算する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_articles: usize,
    pub published: usize,
    pub review: usize,
    pub draft: usize,
    pub total_views: u64,
    pub total_engagement: u64,
    pub total_authors: usize,
}

/// 著者単位の集計統計
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStats {
    pub total_articles: usize,
    pub published: usize,
    pub total_views: u64,
    /// 平均エンゲージメント（最近接整数に丸め、記事0件なら0）
    pub avg_engagement: u64,
}

/// 全記事・全ユーザーからストア統計を計算する
pub fn compute_store_stats(articles: &[Article], users: &[User]) -> StoreStats {
    let counts = count_articles_by_status(articles);
    StoreStats {
        total_articles: articles.len(),
        published: counts.published,
        review: counts.review,
        draft: counts.draft,
        total_views: articles.iter().map(|a| a.views).sum(),
        total_engagement: articles.iter().map(|a| a.engagement).sum(),
        total_authors: users.iter().filter(|u| u.role == UserRole::Author).count(),
    }
}

/// 1人の著者の記事群から著者統計を計算する
pub fn compute_author_stats(articles: &[&Article]) -> AuthorStats {
    let total_engagement: u64 = articles.iter().map(|a| a.engagement).sum();
    let avg_engagement = if articles.is_empty() {
        0
    } else {
        (total_engagement as f64 / articles.len() as f64).round() as u64
    };

    AuthorStats {
        total_articles: articles.len(),
        published: articles.iter().filter(|a| a.is_published()).count(),
        total_views: articles.iter().map(|a| a.views).sum(),
        avg_engagement,
    }
}
