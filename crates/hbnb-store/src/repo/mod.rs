//! Repository layer mapping entities to SQLite rows
//!
//! `entity_repo` writes (upsert, delete, join-table sync), `hydration`
//! reads rows back into entities.

pub mod entity_repo;
pub mod hydration;

pub use entity_repo::EntityRepo;
