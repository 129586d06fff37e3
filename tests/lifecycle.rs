//! 記事ライフサイクルの統合テスト
//!
//! ファイルストレージを挟んで、投稿→承認→公開→取り下げの
//! 一連の流れとプロセス間の永続化ラウンドトリップを検証する。

use chronicle::domain::article::{ArticleDraft, ArticlePatch, ArticleStatus};
use chronicle::domain::session::Session;
use chronicle::domain::store::ArticleStore;
use chronicle::domain::user::UserRole;
use chronicle::infra::storage::{FileStorage, MemoryStorage};
use chronicle::types::keys;
use tempfile::tempdir;

fn draft(title: &str, author: &str, author_id: i64) -> ArticleDraft {
    ArticleDraft {
        title: title.to_string(),
        author: author.to_string(),
        author_id,
        category: "Heritage".to_string(),
        image: "https://example.com/img.jpg".to_string(),
        summary: "要約".to_string(),
        content: "本文".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_full_lifecycle_with_file_storage() {
    let dir = tempdir().expect("一時ディレクトリの作成に失敗");

    // 初回起動: シードが正となる
    let mut store = ArticleStore::new(FileStorage::new(dir.path())).expect("ストア初期化に失敗");
    assert_eq!(store.get_articles().len(), 6, "初回はシードの6件のはず");

    // 著者としてログインして下書きを作成
    let session = Session::new(MemoryStorage::new());
    let author = session
        .login(&mut store, "soumya@kcc.in", UserRole::Author)
        .expect("ログインに失敗");
    let article = store
        .add_article(draft("新しいルポ", &author.name, author.id))
        .expect("記事作成に失敗");
    assert_eq!(article.id, 7, "シード最大ID(6)+1で採番されるべき");

    // 投稿→承認→公開
    store
        .update_article_status(article.id, ArticleStatus::Review)
        .expect("投稿に失敗");
    let published = store
        .update_article_status(article.id, ArticleStatus::Published)
        .expect("承認に失敗");
    assert!(published.publish_date.is_some(), "公開日が設定されるべき");

    // 編集を加える
    store
        .update_article(
            article.id,
            ArticlePatch {
                summary: Some("改訂された要約".to_string()),
                ..Default::default()
            },
        )
        .expect("更新に失敗");

    // 別プロセス相当: 同じディレクトリから新しいストアを起動
    let reopened = ArticleStore::new(FileStorage::new(dir.path())).expect("再起動に失敗");
    assert_eq!(reopened.get_articles(), store.get_articles());
    assert_eq!(reopened.get_users(), store.get_users());

    let revived = reopened
        .get_article_by_id(article.id)
        .expect("再起動後に記事が見つからない");
    assert_eq!(revived.status, ArticleStatus::Published);
    assert_eq!(revived.summary, "改訂された要約");
    assert_eq!(revived.publish_date, published.publish_date);

    println!("✅ ファイルストレージ統合テスト成功");
}

#[test]
fn test_corrupt_blob_falls_back_to_seed() {
    let dir = tempdir().expect("一時ディレクトリの作成に失敗");

    // 壊れた記事ブロブを書き込んでおく
    std::fs::write(dir.path().join(format!("{}.json", keys::ARTICLES)), "{{{{")
        .expect("破損データの書き込みに失敗");

    let store = ArticleStore::new(FileStorage::new(dir.path())).expect("ストア初期化に失敗");

    // クラッシュせず、シードが正として使われる
    assert_eq!(store.get_articles().len(), 6);

    println!("✅ 破損ブロブフォールバック統合テスト成功");
}

#[test]
fn test_reject_path_removes_article() {
    let dir = tempdir().expect("一時ディレクトリの作成に失敗");
    let mut store = ArticleStore::new(FileStorage::new(dir.path())).expect("ストア初期化に失敗");

    // レビュー中のシード記事(id=6)を却下＝削除する
    store.delete_article(6).expect("却下に失敗");
    assert!(store.get_article_by_id(6).is_none());

    // 削除は永続化され、再起動後も戻らない（墓石なし）
    let reopened = ArticleStore::new(FileStorage::new(dir.path())).expect("再起動に失敗");
    assert!(reopened.get_article_by_id(6).is_none());
    assert_eq!(reopened.get_stats().review, 0);
}
