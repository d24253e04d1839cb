//! Migration framework
//!
//! Provides:
//! - Migration runner with checksums
//! - Idempotent application
//! - Embedded SQL migrations
//! - Schema teardown for test isolation

mod checksums;
mod embedded;
mod runner;

pub use embedded::TABLES_DROP_ORDER;
pub use runner::{apply_migrations, drop_all_tables};
