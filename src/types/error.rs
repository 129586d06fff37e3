use thiserror::Error;

/// ストア共通のエラー型
/// 複数のモジュールで使用される基盤的なエラーのみを定義
#[derive(Error, Debug)]
pub enum StoreError {
    /// 指定されたIDの記事が存在しない
    #[error("記事が見つかりません: id={id}")]
    ArticleNotFound { id: i64 },

    /// 記事ステータスの不正な遷移
    #[error("不正なステータス遷移です: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// ファイルI/Oエラー
    #[error("ファイル操作エラー: {path} - {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSONシリアライゼーション/デシリアライゼーションエラー
    #[error("JSON処理エラー: {context} - {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAMLシードデータの解析エラー
    #[error("YAML処理エラー: {context} - {source}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl StoreError {
    /// 記事不在エラーを作成
    pub fn article_not_found(id: i64) -> Self {
        Self::ArticleNotFound { id }
    }

    /// 不正遷移エラーを作成
    pub fn invalid_transition<F: ToString, T: ToString>(from: F, to: T) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// ファイルI/Oエラーを作成
    pub fn file_io<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// JSON処理エラーを作成
    pub fn json<C: Into<String>>(context: C, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// YAML処理エラーを作成
    pub fn yaml<C: Into<String>>(context: C, source: serde_yaml::Error) -> Self {
        Self::Yaml {
            context: context.into(),
            source,
        }
    }
}

/// ストアエラーのResult型エイリアス
pub type StoreResult<T> = std::result::Result<T, StoreError>;
