//! HBNB Core - entity model and persistence interface
//!
//! This crate provides:
//! - The closed set of entity kinds with their static field schemas
//! - The `Entity` record (identity, typed fields, extra attributes)
//! - The `Storage` trait both backends implement
//! - Read-only queries over any storage
//! - The error and logging facilities shared by the workspace

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod queries;
pub mod storage;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, HbnbError, Result};
pub use model::{AttrOutcome, Entity, EntityKind, ExtraAttrs};
pub use storage::Storage;
