//! Error helpers for hbnb-store
//!
//! Everything the backends return is an `HbnbError`; these build the
//! store-specific variants from the underlying failures.

use hbnb_core::errors::HbnbError;

/// Result type alias using HbnbError
pub type Result<T> = std::result::Result<T, HbnbError>;

/// Create a transaction error from rusqlite::Error
pub fn from_rusqlite(op: &str, err: rusqlite::Error) -> HbnbError {
    HbnbError::BackendTransaction {
        op: op.to_string(),
        message: err.to_string(),
    }
}

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> HbnbError {
    HbnbError::BackendTransaction {
        op: "migration".to_string(),
        message: format!("Migration {} failed: {}", migration_id, reason),
    }
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> HbnbError {
    HbnbError::CorruptStore {
        location: "schema_version".to_string(),
        reason: format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ),
    }
}

/// Create a corrupt-store error for a persisted location
pub fn corrupt(location: impl Into<String>, reason: impl Into<String>) -> HbnbError {
    HbnbError::CorruptStore {
        location: location.into(),
        reason: reason.into(),
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> HbnbError {
    HbnbError::Io {
        op: operation.to_string(),
        message: err.to_string(),
    }
}
