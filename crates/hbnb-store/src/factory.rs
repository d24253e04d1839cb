//! Backend factory
//!
//! The one place that knows which concrete engine a configuration selects.
//! Callers get a ready `Box<dyn Storage>` with its first `reload` done.

use hbnb_core::Storage;

use crate::config::{StorageConfig, StorageKind};
use crate::db_storage::DbStorage;
use crate::errors::Result;
use crate::file_storage::FileStorage;

/// Build the configured backend and load its live view
///
/// # Errors
///
/// Returns `CorruptStore` when the persisted state cannot be read back, and
/// `BackendTransaction` / `Io` when the backend cannot be opened.
pub fn open_storage(config: &StorageConfig) -> Result<Box<dyn Storage>> {
    let mut storage: Box<dyn Storage> = match config.kind {
        StorageKind::File => Box::new(FileStorage::new(config.file_path.clone())),
        StorageKind::Db => Box::new(DbStorage::open(&config.db, config.is_test_env())?),
    };
    tracing::info!(backend = %config.kind, "storage selected");

    storage.reload()?;
    Ok(storage)
}
