//! Directory-backed key-value store, one `<key>.json` file per blob

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use super::KvStore;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Use `root` as the storage directory, creating it when missing
    pub fn open(root: impl AsRef<Path>) -> AppResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        tracing::info!(directory = %root.display(), "Opened file store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::Storage(format!("Invalid blob key '{}'", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        // write then rename so a crash never leaves a half-written blob
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
