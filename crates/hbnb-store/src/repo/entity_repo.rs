//! SQLite writes for entities
//!
//! Only assigned columns are written, so the table's defaults fill the
//! rest; the row read back through `RETURNING` replaces the caller's entity.

use hbnb_core::model::entity::format_timestamp;
use hbnb_core::model::schema::FieldType;
use hbnb_core::{Entity, EntityKind};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use serde_json::Value;

use crate::errors::{corrupt, from_rusqlite, Result};
use crate::repo::hydration::{load_amenity_ids, row_payload};

/// Column holding attributes outside the schema
pub const EXTRA_COLUMN: &str = "extra";

/// SQLite repository for entities
pub struct EntityRepo;

fn to_sql(value: &Value) -> Option<SqlValue> {
    match value {
        Value::String(s) => Some(SqlValue::Text(s.clone())),
        Value::Number(n) => n
            .as_i64()
            .map(SqlValue::Integer)
            .or_else(|| n.as_f64().map(SqlValue::Real)),
        Value::Bool(b) => Some(SqlValue::Integer(i64::from(*b))),
        Value::Null => Some(SqlValue::Null),
        _ => None,
    }
}

impl EntityRepo {
    /// Insert the entity, or update the row with the same id
    ///
    /// Returns the entity as stored, server defaults included.
    pub fn upsert(conn: &Connection, table: &str, entity: &Entity) -> Result<Entity> {
        let mut columns: Vec<&str> = vec!["id", "created_at", "updated_at"];
        let mut values: Vec<SqlValue> = vec![
            SqlValue::Text(entity.id().to_string()),
            SqlValue::Text(format_timestamp(&entity.created_at())),
            SqlValue::Text(format_timestamp(&entity.updated_at())),
        ];

        for (name, value) in entity.assigned_fields() {
            if entity.kind().field(name).map(|f| f.ty) == Some(FieldType::StrList) {
                continue;
            }
            let sql_value = to_sql(value).ok_or_else(|| {
                corrupt(entity.key(), format!("{} has no column representation", name))
            })?;
            columns.push(name);
            values.push(sql_value);
        }

        columns.push(EXTRA_COLUMN);
        values.push(SqlValue::Text(serde_json::to_string(
            &entity.extra().to_json_map(),
        )?));

        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        let updates: Vec<String> = columns
            .iter()
            .filter(|c| **c != "id" && **c != "created_at")
            .map(|c| format!("{c} = excluded.{c}"))
            .collect();

        let sql = format!(
            "INSERT INTO {table} ({cols}) VALUES ({vals})
             ON CONFLICT(id) DO UPDATE SET {updates}
             RETURNING *",
            cols = columns.join(", "),
            vals = placeholders.join(", "),
            updates = updates.join(", "),
        );

        let payload = {
            let mut stmt = conn.prepare(&sql).map_err(|e| from_rusqlite("db_new", e))?;
            let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
            stmt.query_row(params_from_iter(values), |row| row_payload(row, &names))
                .map_err(|e| from_rusqlite("db_new", e))?
        };

        let mut payload = payload.into_payload(table)?;
        if entity.kind() == EntityKind::Place {
            if let Some(ids) = entity.get("amenity_ids") {
                Self::sync_amenities(conn, entity.id(), ids)?;
            }
            let ids = load_amenity_ids(conn, entity.id())?;
            if !ids.is_empty() {
                payload.insert("amenity_ids".to_string(), Value::from(ids));
            }
        }

        Entity::from_payload(entity.kind(), payload)
    }

    /// Replace the place's amenity links with `ids`
    fn sync_amenities(conn: &Connection, place_id: &str, ids: &Value) -> Result<()> {
        conn.execute("DELETE FROM place_amenity WHERE place_id = ?1", [place_id])
            .map_err(|e| from_rusqlite("db_new", e))?;

        let mut stmt = conn
            .prepare("INSERT OR IGNORE INTO place_amenity (place_id, amenity_id) VALUES (?1, ?2)")
            .map_err(|e| from_rusqlite("db_new", e))?;
        for amenity_id in ids.as_array().into_iter().flatten().filter_map(Value::as_str) {
            stmt.execute([place_id, amenity_id])
                .map_err(|e| from_rusqlite("db_new", e))?;
        }
        Ok(())
    }

    /// Delete by primary key; returns the number of rows removed
    pub fn delete(conn: &Connection, table: &str, id: &str) -> Result<usize> {
        conn.execute(&format!("DELETE FROM {} WHERE id = ?1", table), [id])
            .map_err(|e| from_rusqlite("db_delete", e))
    }
}
