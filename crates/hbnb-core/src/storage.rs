//! The persistence interface shared by both backends
//!
//! The interpreter and the query layer only ever see `dyn Storage`; which
//! concrete engine sits behind it is decided once at startup.

use std::collections::BTreeMap;

use crate::errors::Result;
use crate::model::{Entity, EntityKind};

/// Uniform persistence interface
///
/// `new` registers (file) or stages and flushes (relational) an entity,
/// `save` makes everything registered durable, `reload` refreshes the live
/// view from the backing store and `close` ends the current scope.
pub trait Storage {
    /// Live entities keyed by `"<Class>.<id>"`, optionally filtered by kind
    ///
    /// # Errors
    ///
    /// The relational backend fails with `NoActiveSession` outside a session.
    fn all(&self, kind: Option<EntityKind>) -> Result<BTreeMap<String, Entity>>;

    /// Register an entity under its composite key
    ///
    /// The backend may write server-assigned values back into `entity`.
    ///
    /// # Errors
    ///
    /// Backend specific; the relational backend rolls back and returns
    /// `BackendTransaction` when the flush fails.
    fn new(&mut self, entity: &mut Entity) -> Result<()>;

    /// Persist every registered change
    ///
    /// # Errors
    ///
    /// Returns `Io` / `BackendTransaction` when the write or commit fails.
    fn save(&mut self) -> Result<()>;

    /// Remove an entity; `None` or an absent entity is a no-op
    ///
    /// # Errors
    ///
    /// Returns `Io` / `BackendTransaction` when the removal cannot be made durable.
    fn delete(&mut self, entity: Option<&Entity>) -> Result<()>;

    /// Refresh the live view from the backing store
    ///
    /// # Errors
    ///
    /// Returns `CorruptStore` when the persisted state cannot be read back.
    fn reload(&mut self) -> Result<()>;

    /// End the current scope
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn close(&mut self) -> Result<()>;

    /// Look up one entity by kind and id
    ///
    /// # Errors
    ///
    /// Propagates the failure of [`Storage::all`].
    fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        let key = kind.key_for(id);
        Ok(self.all(Some(kind))?.remove(&key))
    }

    /// Number of live entities, optionally filtered by kind
    ///
    /// # Errors
    ///
    /// Propagates the failure of [`Storage::all`].
    fn count(&self, kind: Option<EntityKind>) -> Result<usize> {
        Ok(self.all(kind)?.len())
    }
}
