//! Chronicle: ニュースポータルの記事・ユーザーデータストア
//!
//! 記事のライフサイクル（draft → review → published）と
//! キーバリューストレージへのスナップショット永続化を管理します。

pub mod app;
pub mod domain;
pub mod infra;
pub mod types;
