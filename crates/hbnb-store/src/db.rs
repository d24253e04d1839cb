//! Database connection management
//!
//! Provides utilities for opening and managing SQLite connections

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Name that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(|e| from_rusqlite("db_open", e))
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|e| from_rusqlite("db_open", e))
}

/// Open the database named by `database`, `:memory:` included
pub fn open_named(database: &str) -> Result<Connection> {
    if database == IN_MEMORY {
        open_in_memory()
    } else {
        open(database)
    }
}

/// Configure a connection
///
/// Foreign keys are always enforced. WAL is only meaningful for on-disk
/// databases.
pub fn configure(conn: &Connection, wal: bool) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(|e| from_rusqlite("db_configure", e))?;

    if wal {
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| from_rusqlite("db_configure", e))?;
    }

    Ok(())
}
