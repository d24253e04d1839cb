//! Relational storage on SQLite
//!
//! One connection, one session at a time. `reload` opens the session,
//! the first write of a session begins a transaction, `save` commits it and
//! `close` rolls back whatever was not committed.

use hbnb_core::errors::HbnbError;
use hbnb_core::{log_op_end, log_op_error, log_op_start, Entity, EntityKind, Storage};
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::config::DbConfig;
use crate::db;
use crate::errors::{from_rusqlite, Result};
use crate::migrations::{apply_migrations, drop_all_tables};
use crate::repo::hydration::load_kind;
use crate::repo::EntityRepo;

pub struct DbStorage {
    conn: Connection,
    database: String,
    session: bool,
}

impl std::fmt::Debug for DbStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbStorage")
            .field("database", &self.database)
            .field("session", &self.session)
            .finish()
    }
}

impl DbStorage {
    /// Open the database named by `config`
    ///
    /// With `drop_schema` every table is dropped before anything else
    /// happens; the next `reload` recreates them.
    ///
    /// # Errors
    ///
    /// Returns `BackendTransaction` if the database cannot be opened or
    /// configured.
    pub fn open(config: &DbConfig, drop_schema: bool) -> Result<Self> {
        let conn = db::open_named(&config.database)?;
        db::configure(&conn, config.database != db::IN_MEMORY)?;

        tracing::info!(
            host = %config.host,
            user = %config.user,
            database = %config.database,
            drop_schema,
            "opened relational storage"
        );

        if drop_schema {
            drop_all_tables(&conn)?;
        }

        Ok(Self {
            conn,
            database: config.database.clone(),
            session: false,
        })
    }

    /// Whether a session is open
    pub fn has_session(&self) -> bool {
        self.session
    }

    /// Whether the session has uncommitted writes
    pub fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }

    /// Underlying connection, for inspection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn require_session(&self, op: &str) -> Result<()> {
        if self.session {
            Ok(())
        } else {
            Err(HbnbError::NoActiveSession { op: op.to_string() })
        }
    }

    fn begin_if_needed(&self, op: &str) -> Result<()> {
        if self.conn.is_autocommit() {
            self.conn
                .execute_batch("BEGIN")
                .map_err(|e| from_rusqlite(op, e))?;
        }
        Ok(())
    }

    fn rollback(&self) {
        if self.conn.is_autocommit() {
            return;
        }
        if let Err(err) = self.conn.execute_batch("ROLLBACK") {
            tracing::warn!(error = %err, "rollback failed");
        }
    }

    /// Run a write inside the session transaction, rolling back on failure
    fn write_scoped<T>(&mut self, op: &str, write: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        self.require_session(op)?;
        self.begin_if_needed(op)?;

        let start = Instant::now();
        log_op_start!(op);
        match write(&self.conn) {
            Ok(value) => {
                log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
                Ok(value)
            }
            Err(err) => {
                self.rollback();
                log_op_error!(op, err.clone(), duration_ms = start.elapsed().as_millis() as u64);
                Err(err)
            }
        }
    }
}

impl Storage for DbStorage {
    fn all(&self, kind: Option<EntityKind>) -> Result<BTreeMap<String, Entity>> {
        self.require_session("db_all")?;

        let kinds: Vec<EntityKind> = match kind {
            Some(kind) => vec![kind],
            None => EntityKind::ALL.to_vec(),
        };

        let mut objects = BTreeMap::new();
        for kind in kinds {
            objects.extend(load_kind(&self.conn, kind)?);
        }
        Ok(objects)
    }

    fn new(&mut self, entity: &mut Entity) -> Result<()> {
        self.require_session("db_new")?;
        let table = entity
            .kind()
            .table()
            .ok_or_else(|| HbnbError::UnsupportedClass {
                class_name: entity.kind().to_string(),
                backend: "db".to_string(),
            })?;

        let stored = self.write_scoped("db_new", |conn| EntityRepo::upsert(conn, table, entity))?;
        *entity = stored;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.require_session("db_save")?;
        if self.conn.is_autocommit() {
            return Ok(());
        }

        let start = Instant::now();
        log_op_start!("db_save");
        match self.conn.execute_batch("COMMIT") {
            Ok(()) => {
                log_op_end!("db_save", duration_ms = start.elapsed().as_millis() as u64);
                Ok(())
            }
            Err(e) => {
                let err = from_rusqlite("db_save", e);
                self.rollback();
                log_op_error!("db_save", err.clone(), duration_ms = start.elapsed().as_millis() as u64);
                Err(err)
            }
        }
    }

    fn delete(&mut self, entity: Option<&Entity>) -> Result<()> {
        let Some(entity) = entity else {
            return Ok(());
        };
        let Some(table) = entity.kind().table() else {
            return Ok(());
        };

        let removed = self.write_scoped("db_delete", |conn| EntityRepo::delete(conn, table, entity.id()))?;
        tracing::debug!(entity_key = %entity.key(), removed, "delete");
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        let start = Instant::now();
        log_op_start!("db_reload", database = %self.database);

        self.rollback();
        match apply_migrations(&mut self.conn) {
            Ok(()) => {
                self.session = true;
                log_op_end!("db_reload", duration_ms = start.elapsed().as_millis() as u64);
                Ok(())
            }
            Err(err) => {
                self.session = false;
                log_op_error!("db_reload", err.clone(), duration_ms = start.elapsed().as_millis() as u64);
                Err(err)
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        self.rollback();
        self.session = false;
        Ok(())
    }
}
