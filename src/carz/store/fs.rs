use super::{DataStore, StoreKey};
use crate::error::{CarzError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store: one JSON file per [`StoreKey`] inside `root`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CarzError::Io)?;
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(CarzError::Io)?;
        Ok(Some(content))
    }

    fn write(&mut self, key: StoreKey, value: &str) -> Result<()> {
        self.ensure_dir()?;

        // Write to a sibling file first so a failed write never truncates the old value.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(CarzError::Io)?;
        fs::rename(&tmp, &path).map_err(CarzError::Io)?;
        Ok(())
    }
}
