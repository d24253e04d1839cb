//! HBNB Store - the two storage backends
//!
//! Provides:
//! - `FileStorage`: the live set as one JSON document, atomic and locked writes
//! - `DbStorage`: one SQLite row per entity, sessions with lazy transactions
//! - SQLite schema with migrations framework
//! - Environment-driven configuration and the backend factory

pub mod atomic;
pub mod config;
pub mod db;
pub mod db_storage;
pub mod errors;
pub mod factory;
pub mod file_storage;
pub mod lock;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use config::{DbConfig, StorageConfig, StorageKind};
pub use db_storage::DbStorage;
pub use errors::Result;
pub use factory::open_storage;
pub use file_storage::FileStorage;
