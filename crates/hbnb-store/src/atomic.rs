//! Whole-file replacement for the file backend
//!
//! The document is written next to its target, flushed to disk and renamed
//! over the target, so a reader sees either the old document or the new one.

use crate::errors::{io_error, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// `<path><suffix>`, e.g. `file.json` + `.tmp` -> `file.json.tmp`
pub(crate) fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

/// Replace `target` with `content`
///
/// Missing parent directories are created. On failure the temporary file is
/// removed and `target` is left as it was.
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("create_store_dir", e))?;
    }

    let temp = sibling_path(target, ".tmp");
    let replaced = write_synced(&temp, content)
        .map_err(|e| io_error("write_store_temp", e))
        .and_then(|()| fs::rename(&temp, target).map_err(|e| io_error("rename_store_temp", e)));

    if replaced.is_err() {
        let _ = fs::remove_file(&temp);
    }
    replaced
}
