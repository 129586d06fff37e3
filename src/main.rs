use std::path::Path;

fn main() {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();

    let data_dir = std::env::var("CHRONICLE_DATA_DIR").unwrap_or_else(|_| "data".to_string());

    if let Err(e) = chronicle::app::workflow::run_demo(Path::new(&data_dir)) {
        eprintln!("デモワークフローの実行中にエラーが発生しました: {:#}", e);
        std::process::exit(1);
    }
}
