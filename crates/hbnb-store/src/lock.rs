//! Single-writer lock for the file backend
//!
//! An exclusive advisory lock on a sidecar `<path>.lock` file, held for the
//! duration of one `save()` or `reload()`. Processes that go through
//! `FileStorage` serialize on it; anything writing the document directly
//! does not.

use crate::atomic::sibling_path;
use crate::errors::{io_error, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Held lock; released when dropped
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Block until the exclusive lock for `store_path` is acquired
    pub fn acquire(store_path: &Path) -> Result<Self> {
        let path = lock_path(store_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_store_dir", e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| io_error("open_store_lock", e))?;
        file.lock().map_err(|e| io_error("acquire_store_lock", e))?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(err) = self.file.unlock() {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to release store lock");
        }
    }
}

/// Sidecar lock file path for a store document
pub fn lock_path(store_path: &Path) -> PathBuf {
    sibling_path(store_path, ".lock")
}
