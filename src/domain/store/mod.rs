pub mod repository;
pub mod seed;
pub mod stats;

// 公開APIの再エクスポート
pub use repository::ArticleStore;
pub use seed::{load_seed, SeedData};
pub use stats::{AuthorStats, StoreStats};
