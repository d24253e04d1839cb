//! File-backed storage
//!
//! The whole live set is one JSON document mapping `"<Class>.<id>"` to the
//! entity's serialized attributes. `save` rewrites the document wholesale;
//! `reload` replaces the live set with what the document holds.

use hbnb_core::model::entity::CLASS_FIELD;
use hbnb_core::{log_op_end, log_op_error, log_op_start, Entity, EntityKind, Storage};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::atomic::atomic_write;
use crate::errors::{corrupt, io_error, Result};
use crate::lock::StoreLock;

/// Default document path
pub const DEFAULT_FILE_PATH: &str = "file.json";

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    objects: BTreeMap<String, Entity>,
}

impl FileStorage {
    /// Create an empty storage bound to `path`; nothing is read until `reload`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            objects: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_document(&self) -> Result<usize> {
        let document: Map<String, Value> = self
            .objects
            .iter()
            .map(|(key, entity)| (key.clone(), Value::Object(entity.to_dict())))
            .collect();
        let bytes = serde_json::to_vec(&document)?;

        let _lock = StoreLock::acquire(&self.path)?;
        atomic_write(&self.path, &bytes)?;
        Ok(document.len())
    }

    fn read_document(&self) -> Result<BTreeMap<String, Entity>> {
        let _lock = StoreLock::acquire(&self.path)?;
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(io_error("read_store", err)),
        };
        parse_document(&self.path.display().to_string(), &bytes)
    }
}

/// Parse a persisted document into a fresh live set
///
/// Any entry that cannot be reconstructed fails the whole document.
pub fn parse_document(location: &str, bytes: &[u8]) -> Result<BTreeMap<String, Entity>> {
    let document: Map<String, Value> = serde_json::from_slice(bytes)
        .map_err(|e| corrupt(location, format!("unparsable document: {}", e)))?;

    let mut objects = BTreeMap::new();
    for (key, value) in document {
        let Value::Object(payload) = value else {
            return Err(corrupt(location, format!("{}: entry is not an object", key)));
        };

        let class_name = payload
            .get(CLASS_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| corrupt(location, format!("{}: missing {}", key, CLASS_FIELD)))?;
        let kind: EntityKind = class_name
            .parse()
            .map_err(|_| corrupt(location, format!("{}: unknown class {}", key, class_name)))?;

        let entity = Entity::from_payload(kind, payload)
            .map_err(|e| corrupt(location, format!("{}: {}", key, e)))?;
        if entity.key() != key {
            return Err(corrupt(
                location,
                format!("{}: key does not match payload {}", key, entity.key()),
            ));
        }
        objects.insert(key, entity);
    }
    Ok(objects)
}

impl Storage for FileStorage {
    fn all(&self, kind: Option<EntityKind>) -> Result<BTreeMap<String, Entity>> {
        Ok(self
            .objects
            .iter()
            .filter(|(_, entity)| kind.is_none_or(|k| entity.kind() == k))
            .map(|(key, entity)| (key.clone(), entity.clone()))
            .collect())
    }

    fn new(&mut self, entity: &mut Entity) -> Result<()> {
        self.objects.insert(entity.key(), entity.clone());
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let start = Instant::now();
        log_op_start!("file_save", path = %self.path.display());

        match self.write_document() {
            Ok(count) => {
                log_op_end!(
                    "file_save",
                    duration_ms = start.elapsed().as_millis() as u64,
                    object_count = count
                );
                Ok(())
            }
            Err(err) => {
                log_op_error!(
                    "file_save",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn delete(&mut self, entity: Option<&Entity>) -> Result<()> {
        let Some(entity) = entity else {
            return Ok(());
        };
        let key = entity.key();
        let Some(removed) = self.objects.remove(&key) else {
            return Ok(());
        };
        // Memory must keep matching the document when the write fails
        if let Err(err) = self.save() {
            self.objects.insert(key, removed);
            return Err(err);
        }
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        let start = Instant::now();
        log_op_start!("file_reload", path = %self.path.display());

        match self.read_document() {
            Ok(objects) => {
                self.objects = objects;
                log_op_end!(
                    "file_reload",
                    duration_ms = start.elapsed().as_millis() as u64,
                    object_count = self.objects.len()
                );
                Ok(())
            }
            Err(err) => {
                log_op_error!(
                    "file_reload",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        self.reload()
    }
}
