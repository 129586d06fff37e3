use super::KeyValueStorage;
use crate::types::error::{StoreError, StoreResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// ファイルベースの本番用キーバリューストレージ
///
/// データディレクトリ配下に `<キー名>.json` として1キー1ファイルで保存する。
/// 同じディレクトリを共有する複数プロセスはlast-writer-winsとなり、
/// 競合検出は行わない（既知の制限）。
#[derive(Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// 指定されたデータディレクトリを使用するストレージを作成
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// データディレクトリへの参照を返す
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// キーに対応するファイルパスを組み立てる
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::file_io(path.display().to_string(), e)),
        }
    }

    fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::file_io(self.dir.display().to_string(), e))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| StoreError::file_io(path.display().to_string(), e))
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::file_io(path.display().to_string(), e)),
        }
    }
}
