//! Migration fingerprints
//!
//! A migration is identified by its id and its SQL with line endings
//! normalized, so a CRLF checkout does not look like an edited migration.

use sha2::{Digest, Sha256};

/// Hex SHA-256 over `id`, a NUL separator and the normalized SQL
pub fn migration_checksum(id: &str, sql: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    hasher.update([0u8]);
    for line in sql.lines() {
        hasher.update(line.trim_end_matches('\r').as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}
