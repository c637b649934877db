use super::LocalCache;
use crate::error::{LinkboardError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const CACHE_FILENAME: &str = "links.json";

pub struct FsCache {
    root: PathBuf,
}

impl FsCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(CACHE_FILENAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(LinkboardError::Io)?;
        }
        Ok(())
    }
}

impl LocalCache for FsCache {
    fn read(&self) -> Result<Option<String>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(LinkboardError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, snapshot: &str) -> Result<()> {
        self.ensure_dir(&self.root)?;

        // Atomic write
        let tmp_file = self.root.join(format!(".links-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, snapshot).map_err(LinkboardError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, self.path()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(LinkboardError::Io(e));
        }
        Ok(())
    }
}
