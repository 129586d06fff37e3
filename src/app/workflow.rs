use crate::domain::article::{ArticleDraft, ArticleStatus};
use crate::domain::reader::ReaderPrefs;
use crate::domain::session::Session;
use crate::domain::store::ArticleStore;
use crate::domain::subscription::{Frequency, Subscription, SubscriptionBook, SubscriptionPlan};
use crate::domain::user::UserRole;
use crate::infra::storage::{FileStorage, MemoryStorage};
use anyhow::{Context, Result};
use std::path::Path;

/// 記事ライフサイクルのデモワークフロー
///
/// 1. ストアを初期化（永続化済みデータがあれば再読込）
/// 2. 著者としてログインし、下書きを作成して投稿
/// 3. 編集者として承認し、公開
/// 4. 読者のフォロー・購読フローを実行
/// 5. 集計統計を表示
pub fn run_demo(data_dir: &Path) -> Result<()> {
    println!("=== Chronicle デモワークフロー開始 ===");

    let storage = FileStorage::new(data_dir);
    let mut store = ArticleStore::new(storage.clone()).context("ストアの初期化に失敗")?;
    // セッションはブラウザのsessionStorage相当なのでインメモリ
    let session = Session::new(MemoryStorage::new());

    let stats = store.get_stats();
    println!(
        "ストア読み込み完了: 記事{}件（公開{} / レビュー{} / 下書き{}）、著者{}名",
        stats.total_articles, stats.published, stats.review, stats.draft, stats.total_authors
    );

    // 段階1: 著者が下書きを作成して投稿する
    println!("\n=== 著者フロー ===");
    let author = session
        .login(&mut store, "soumya@kcc.in", UserRole::Author)
        .context("著者のログインに失敗")?;
    println!("ログイン: {} ({})", author.name, author.role);

    let article = store
        .add_article(ArticleDraft {
            title: "Howrah Bridge at Dawn: A Photo Essay".to_string(),
            author: author.name.clone(),
            author_id: author.id,
            category: "Heritage".to_string(),
            image: "https://images.unsplash.com/photo-1536421469767-80559bb6f5e1?w=800".to_string(),
            summary: "Before the city wakes, the bridge belongs to flower sellers and ferrymen."
                .to_string(),
            content: "Draft content...".to_string(),
            ..Default::default()
        })
        .context("記事の作成に失敗")?;
    println!("下書き作成: id={} 「{}」", article.id, article.title);

    store
        .update_article_status(article.id, ArticleStatus::Review)
        .context("レビューへの投稿に失敗")?;
    println!("レビューに投稿しました");
    session.logout().context("ログアウトに失敗")?;

    // 段階2: 編集者がレビューキューを処理する
    println!("\n=== 編集者フロー ===");
    let editor = session
        .login(&mut store, "priya@kcc.in", UserRole::Editor)
        .context("編集者のログインに失敗")?;
    println!("ログイン: {} ({})", editor.name, editor.role);

    let queue_len = store.get_articles_by_status(ArticleStatus::Review).len();
    println!("レビュー待ち: {}件", queue_len);

    let published = store
        .update_article_status(article.id, ArticleStatus::Published)
        .context("承認に失敗")?;
    println!(
        "承認・公開: 「{}」 公開日={}",
        published.title,
        published
            .publish_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    session.logout().context("ログアウトに失敗")?;

    // 段階3: 読者のフォローと購読
    println!("\n=== 読者フロー ===");
    let mut prefs = ReaderPrefs::new(storage.clone()).context("読者設定の読み込みに失敗")?;
    prefs
        .toggle_follow(author.id)
        .context("フォローの切替に失敗")?;
    let feed = prefs.followed_feed(&store);
    println!("フォロー中の著者の公開記事: {}件", feed.len());

    let mut book = SubscriptionBook::new(storage).context("購読者リストの読み込みに失敗")?;
    book.subscribe(
        &mut store,
        Subscription::new(
            "Somnath Roy",
            "somnath@example.in",
            SubscriptionPlan::Premium,
            Frequency::Daily,
            vec!["Heritage".to_string(), "মাছ-ভাত".to_string()],
        ),
    )
    .context("購読登録に失敗")?;
    println!("購読登録完了: 購読者{}名", book.len());

    // 段階4: 集計統計
    println!("\n=== 集計統計 ===");
    let stats = store.get_stats();
    println!(
        "記事{}件 / 総閲覧{}回 / 総エンゲージメント{}",
        stats.total_articles, stats.total_views, stats.total_engagement
    );
    let author_stats = store.get_author_stats(author.id);
    println!(
        "{}: 記事{}件（公開{}件）、平均エンゲージメント{}",
        author.name,
        author_stats.total_articles,
        author_stats.published,
        author_stats.avg_engagement
    );

    println!("\n=== Chronicle デモワークフロー完了 ===");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_demo_workflow_runs() {
        let dir = tempdir().expect("一時ディレクトリの作成に失敗");

        run_demo(dir.path()).expect("デモワークフローが失敗");

        // 2回目の実行は永続化済みデータから再開する
        run_demo(dir.path()).expect("再実行が失敗");

        println!("✅ デモワークフロー実行テスト成功");
    }
}
