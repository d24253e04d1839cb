//! Hydration layer - loads entities from SQLite rows
//!
//! Converts rows back into `Entity` values keyed by composite key

use hbnb_core::{Entity, EntityKind};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::errors::{corrupt, from_rusqlite, Result};
use crate::repo::entity_repo::EXTRA_COLUMN;

/// One row's columns, before the `extra` JSON is unpacked
pub struct RowPayload {
    columns: Map<String, Value>,
    extra: Option<String>,
}

impl RowPayload {
    /// Merge the extra attributes into the column values
    pub fn into_payload(self, location: &str) -> Result<Map<String, Value>> {
        let mut payload = match self.extra {
            Some(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    return Err(corrupt(location, "extra column is not a JSON object"))
                }
            },
            None => Map::new(),
        };
        payload.extend(self.columns);
        Ok(payload)
    }
}

/// Read a row into a payload; NULL columns are left unassigned
pub fn row_payload(row: &Row<'_>, names: &[String]) -> rusqlite::Result<RowPayload> {
    let mut columns = Map::new();
    let mut extra = None;

    for (idx, name) in names.iter().enumerate() {
        let value = match row.get_ref(idx)? {
            ValueRef::Null | ValueRef::Blob(_) => continue,
            ValueRef::Integer(i) => Value::from(i),
            ValueRef::Real(f) => Value::from(f),
            ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        };
        if name == EXTRA_COLUMN {
            extra = value.as_str().map(str::to_string);
        } else {
            columns.insert(name.clone(), value);
        }
    }

    Ok(RowPayload { columns, extra })
}

/// Amenity ids linked to a place, in id order
pub fn load_amenity_ids(conn: &Connection, place_id: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT amenity_id FROM place_amenity WHERE place_id = ?1 ORDER BY amenity_id")
        .map_err(|e| from_rusqlite("db_all", e))?;

    let ids = stmt
        .query_map([place_id], |row| row.get(0))
        .map_err(|e| from_rusqlite("db_all", e))?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(|e| from_rusqlite("db_all", e))?;
    Ok(ids)
}

/// Load every row of one kind
///
/// A kind without a table has no rows.
pub fn load_kind(conn: &Connection, kind: EntityKind) -> Result<BTreeMap<String, Entity>> {
    let Some(table) = kind.table() else {
        return Ok(BTreeMap::new());
    };

    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {} ORDER BY id", table))
        .map_err(|e| from_rusqlite("db_all", e))?;
    let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

    let rows = stmt
        .query_map([], |row| row_payload(row, &names))
        .map_err(|e| from_rusqlite("db_all", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| from_rusqlite("db_all", e))?;

    let mut entities = BTreeMap::new();
    for row in rows {
        let mut payload = row.into_payload(table)?;
        if kind == EntityKind::Place {
            if let Some(id) = payload.get("id").and_then(Value::as_str) {
                let ids = load_amenity_ids(conn, id)?;
                if !ids.is_empty() {
                    payload.insert("amenity_ids".to_string(), Value::from(ids));
                }
            }
        }
        let entity = Entity::from_payload(kind, payload)
            .map_err(|e| corrupt(table, e.to_string()))?;
        entities.insert(entity.key(), entity);
    }
    Ok(entities)
}
