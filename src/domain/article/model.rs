use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 記事のライフサイクルステータスを表現するenum
///
/// 読者向けフィードに表示されるのはPublishedのみ。
/// 文字列表現はブラウザ版の保存データと互換（小文字）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// 執筆中（著者のみに見える）
    #[default]
    Draft,
    /// レビュー待ち（編集者の承認キュー）
    Review,
    /// 公開済み（読者向けフィードに表示）
    Published,
}

impl ArticleStatus {
    /// このステータスから `next` への遷移が正当かどうかを判定する
    ///
    /// 正当な遷移:
    /// - draft -> review（投稿）
    /// - review -> published（承認）
    /// - review -> draft（修正依頼）
    /// - published -> draft（取り下げ）
    ///
    /// レビューを経ない公開（draft -> published）と
    /// 公開済みのレビュー戻し（published -> review）は拒否する。
    pub fn can_transition_to(self, next: ArticleStatus) -> bool {
        use ArticleStatus::*;
        matches!(
            (self, next),
            (Draft, Review) | (Review, Published) | (Review, Draft) | (Published, Draft)
        )
    }

    /// 保存データ互換の小文字文字列を返す
    pub fn as_str(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Review => "review",
            ArticleStatus::Published => "published",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 記事エンティティ
///
/// フィールド名はブラウザ版のJSONペイロード（camelCase）と互換。
/// `author` は表示名の非正規化コピーで、`author_id` がユーザーへの参照。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub author_id: i64,
    pub status: ArticleStatus,
    pub category: String,
    pub views: u64,
    pub engagement: u64,
    /// 初回公開日。一度設定されたら以後のステータス変更でも上書きされない
    pub publish_date: Option<NaiveDate>,
    pub image: String,
    pub summary: String,
    pub content: String,
}

impl Article {
    pub fn is_draft(&self) -> bool {
        matches!(self.status, ArticleStatus::Draft)
    }

    pub fn is_in_review(&self) -> bool {
        matches!(self.status, ArticleStatus::Review)
    }

    /// 読者向けフィードに表示してよいかどうか
    pub fn is_published(&self) -> bool {
        matches!(self.status, ArticleStatus::Published)
    }
}

/// 記事作成の入力データ
///
/// IDはストアが採番するため含まない。カウンタと公開日は
/// 省略時にデフォルト（0 / 0 / null）が適用される。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    pub title: String,
    pub author: String,
    pub author_id: i64,
    #[serde(default)]
    pub status: ArticleStatus,
    pub category: String,
    pub image: String,
    pub summary: String,
    pub content: String,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub engagement: Option<u64>,
    #[serde(default)]
    pub publish_date: Option<NaiveDate>,
}

/// 記事の部分更新データ
///
/// 更新可能なフィールドを静的に列挙し、未知キーの混入を防ぐ。
/// ステータスは含まない。遷移の正当性はストアの
/// `update_article_status` が所有する。
#[derive(Debug, Clone, Default)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
}

impl ArticlePatch {
    /// パッチを記事にフィールド単位でマージする（指定フィールドのみ上書き）
    pub fn apply_to(&self, article: &mut Article) {
        if let Some(title) = &self.title {
            article.title = title.clone();
        }
        if let Some(category) = &self.category {
            article.category = category.clone();
        }
        if let Some(summary) = &self.summary {
            article.summary = summary.clone();
        }
        if let Some(content) = &self.content {
            article.content = content.clone();
        }
        if let Some(image) = &self.image {
            article.image = image.clone();
        }
    }
}

/// ステータス別の記事件数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub draft: usize,
    pub review: usize,
    pub published: usize,
}

/// 記事ステータスでフィルタリングする関数
pub fn filter_articles_by_status(articles: &[Article], status: ArticleStatus) -> Vec<&Article> {
    articles
        .iter()
        .filter(|article| article.status == status)
        .collect()
}

/// 記事統計情報を計算する関数
pub fn count_articles_by_status(articles: &[Article]) -> StatusCounts {
    let mut counts = StatusCounts::default();

    for article in articles {
        match article.status {
            ArticleStatus::Draft => counts.draft += 1,
            ArticleStatus::Review => counts.review += 1,
            ArticleStatus::Published => counts.published += 1,
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    // ドメインロジック・振る舞い系テスト
    mod domain {
        use super::*;

        fn sample_article(id: i64, status: ArticleStatus) -> Article {
            Article {
                id,
                title: format!("テスト記事{}", id),
                author: "テスト著者".to_string(),
                author_id: 1,
                status,
                category: "Heritage".to_string(),
                views: 0,
                engagement: 0,
                publish_date: None,
                image: "https://example.com/image.jpg".to_string(),
                summary: "要約".to_string(),
                content: "本文".to_string(),
            }
        }

        #[test]
        fn test_status_transition_legality() {
            use ArticleStatus::*;

            // 正当な遷移
            assert!(Draft.can_transition_to(Review), "投稿は正当のはず");
            assert!(Review.can_transition_to(Published), "承認は正当のはず");
            assert!(Review.can_transition_to(Draft), "修正依頼は正当のはず");
            assert!(Published.can_transition_to(Draft), "取り下げは正当のはず");
            // 不正な遷移
            assert!(
                !Draft.can_transition_to(Published),
                "レビューを経ない公開は拒否されるべき"
            );
            assert!(
                !Published.can_transition_to(Review),
                "公開済みのレビュー戻しは拒否されるべき"
            );

            println!("✅ ステータス遷移判定テスト成功");
        }

        #[test]
        fn test_status_serde_compat() {
            // ブラウザ版の保存データと同じ小文字文字列になること
            assert_eq!(
                serde_json::to_string(&ArticleStatus::Published).unwrap(),
                r#""published""#
            );
            let status: ArticleStatus = serde_json::from_str(r#""review""#).unwrap();
            assert_eq!(status, ArticleStatus::Review);
            assert_eq!(ArticleStatus::Draft.to_string(), "draft");
        }

        #[test]
        fn test_article_json_field_names() {
            // camelCaseのフィールド名で出力されること（authorId, publishDate）
            let article = sample_article(1, ArticleStatus::Published);
            let json = serde_json::to_string(&article).unwrap();

            assert!(json.contains(r#""authorId":1"#), "authorIdが含まれるべき");
            assert!(
                json.contains(r#""publishDate":null"#),
                "publishDateが含まれるべき"
            );

            println!("✅ JSONフィールド名互換テスト成功");
        }

        #[test]
        fn test_patch_merges_only_given_fields() {
            let mut article = sample_article(3, ArticleStatus::Draft);
            let patch = ArticlePatch {
                title: Some("改題".to_string()),
                summary: Some("新しい要約".to_string()),
                ..Default::default()
            };

            patch.apply_to(&mut article);

            assert_eq!(article.title, "改題");
            assert_eq!(article.summary, "新しい要約");
            // 未指定フィールドは維持される
            assert_eq!(article.content, "本文");
            assert_eq!(article.category, "Heritage");
        }

        #[test]
        fn test_filter_and_count_by_status() {
            let articles = vec![
                sample_article(1, ArticleStatus::Published),
                sample_article(2, ArticleStatus::Draft),
                sample_article(3, ArticleStatus::Review),
                sample_article(4, ArticleStatus::Published),
            ];

            let published = filter_articles_by_status(&articles, ArticleStatus::Published);
            assert_eq!(published.len(), 2);
            assert!(published.iter().all(|a| a.is_published()));

            let counts = count_articles_by_status(&articles);
            assert_eq!(counts.draft, 1);
            assert_eq!(counts.review, 1);
            assert_eq!(counts.published, 2);

            println!("✅ ステータス集計テスト成功");
        }
    }
}
