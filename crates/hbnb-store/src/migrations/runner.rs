//! Migration runner
//!
//! Each migration runs once, inside its own transaction, and is recorded in
//! `schema_version` with its fingerprint. A recorded fingerprint that no
//! longer matches the embedded SQL means the schema cannot be trusted.

use chrono::Utc;
use hbnb_core::model::entity::format_timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::migration_checksum;
use crate::migrations::embedded::{Migration, MIGRATIONS, TABLES_DROP_ORDER};

const CREATE_SCHEMA_VERSION: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    migration_id TEXT PRIMARY KEY NOT NULL,
    checksum TEXT NOT NULL,
    applied_at TEXT NOT NULL
)";

/// Bring the schema up to date
///
/// # Errors
///
/// Returns `CorruptStore` when an applied migration was changed since, and
/// `BackendTransaction` when a migration fails to run.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(CREATE_SCHEMA_VERSION)
        .map_err(|e| from_rusqlite("migration", e))?;

    let mut applied = 0;
    for migration in MIGRATIONS {
        if apply_one(conn, migration)? {
            applied += 1;
        }
    }
    tracing::debug!(applied, known = MIGRATIONS.len(), "schema up to date");
    Ok(())
}

/// Returns whether the migration ran
fn apply_one(conn: &mut Connection, migration: &Migration) -> Result<bool> {
    let checksum = migration_checksum(migration.id, migration.sql);

    let recorded: Option<String> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            [migration.id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| from_rusqlite("migration", e))?;

    match recorded {
        Some(expected) if expected == checksum => return Ok(false),
        Some(expected) => return Err(checksum_mismatch(migration.id, &expected, &checksum)),
        None => {}
    }

    let tx = conn
        .transaction()
        .map_err(|e| from_rusqlite("migration", e))?;
    tx.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, &e.to_string()))?;
    tx.execute(
        "INSERT INTO schema_version (migration_id, checksum, applied_at) VALUES (?1, ?2, ?3)",
        params![migration.id, checksum, format_timestamp(&Utc::now())],
    )
    .map_err(|e| from_rusqlite("migration", e))?;
    tx.commit().map_err(|e| from_rusqlite("migration", e))?;

    tracing::info!(migration_id = migration.id, "applied migration");
    Ok(true)
}

/// Drop every table the migrations create, `schema_version` included
///
/// Used for test isolation; the next `apply_migrations` rebuilds the schema.
///
/// # Errors
///
/// Returns `BackendTransaction` if a drop fails.
pub fn drop_all_tables(conn: &Connection) -> Result<()> {
    for table in TABLES_DROP_ORDER {
        conn.execute_batch(&format!("DROP TABLE IF EXISTS {}", table))
            .map_err(|e| from_rusqlite("drop_all_tables", e))?;
    }
    tracing::debug!(tables = TABLES_DROP_ORDER.len(), "dropped schema");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_run_applies_nothing() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert!(apply_one(&mut conn, &MIGRATIONS[0]).is_err());

        apply_migrations(&mut conn).unwrap();
        assert!(!apply_one(&mut conn, &MIGRATIONS[0]).unwrap());
    }

    #[test]
    fn test_tampered_checksum_is_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn.execute(
            "UPDATE schema_version SET checksum = 'bogus' WHERE migration_id = '001_initial_schema'",
            [],
        )
        .unwrap();

        let err = apply_migrations(&mut conn).unwrap_err();
        assert!(err.to_string().contains("Checksum mismatch"));
    }
}
