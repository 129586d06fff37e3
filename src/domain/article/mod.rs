pub mod model;

// 公開APIの再エクスポート
pub use model::{
    count_articles_by_status, filter_articles_by_status, Article, ArticleDraft, ArticlePatch,
    ArticleStatus, StatusCounts,
};
