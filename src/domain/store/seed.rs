use crate::domain::article::Article;
use crate::domain::user::User;
use crate::types::error::{StoreError, StoreResult};
use serde::Deserialize;

/// クレートに埋め込んだYAMLシードドキュメント
const SEED_YAML: &str = include_str!("../data/seed.yaml");

/// シードデータ（記事6件・ユーザー7名のKolkata Chronicle初期状態）
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    pub articles: Vec<Article>,
    pub users: Vec<User>,
}

/// 埋め込みYAMLからシードデータを読み込む
pub fn load_seed() -> StoreResult<SeedData> {
    serde_yaml::from_str(SEED_YAML).map_err(|e| StoreError::yaml("シードデータの解析", e))
}
