//! The entity record shared by every kind
//!
//! An entity is identity (`id` plus timestamps), the class-specific fields its
//! schema declares, and a side map of extra attributes. Only assigned fields
//! are stored; unassigned schema fields read as their type's default.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::extra::ExtraAttrs;
use super::kind::EntityKind;
use super::schema::RESERVED_ATTRS;
use crate::errors::{HbnbError, Result};
use crate::storage::Storage;

/// Text format of `created_at` / `updated_at` in every persisted form
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Name of the discriminator field in serialized entities
pub const CLASS_FIELD: &str = "__class__";

/// Result of assigning one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOutcome {
    Applied,
    Rejected(String),
}

impl AttrOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, AttrOutcome::Applied)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    kind: EntityKind,
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    fields: BTreeMap<&'static str, Value>,
    extra: ExtraAttrs,
}

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Render a timestamp in the persisted text format
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp written by [`format_timestamp`]
pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| HbnbError::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
        })
}

impl Entity {
    /// Create a fresh entity with a new id and equal timestamps
    pub fn new(kind: EntityKind) -> Self {
        let ts = now();
        Self {
            kind,
            id: uuid::Uuid::now_v7().to_string(),
            created_at: ts,
            updated_at: ts,
            fields: BTreeMap::new(),
            extra: ExtraAttrs::new(),
        }
    }

    /// Rehydrate an entity from its serialized attributes
    ///
    /// `id` and the timestamps come from the payload when present and are
    /// generated otherwise. `__class__` is ignored; the caller has already
    /// dispatched on it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTimestamp` for an unparsable timestamp and
    /// `InvalidAttribute` when `id` is not a string or a schema field has the
    /// wrong type.
    pub fn from_payload(kind: EntityKind, payload: Map<String, Value>) -> Result<Self> {
        let mut entity = Entity::new(kind);
        let mut created_from_payload = false;

        for (name, value) in payload {
            match name.as_str() {
                CLASS_FIELD => {}
                "id" => match value {
                    Value::String(id) => entity.id = id,
                    other => {
                        return Err(HbnbError::InvalidAttribute {
                            name,
                            reason: format!("id must be a string, got {}", other),
                        })
                    }
                },
                "created_at" | "updated_at" => {
                    let text = value.as_str().ok_or_else(|| HbnbError::InvalidTimestamp {
                        field: name.clone(),
                        value: value.to_string(),
                    })?;
                    let ts = parse_timestamp(&name, text)?;
                    if name == "created_at" {
                        entity.created_at = ts;
                        created_from_payload = true;
                    } else {
                        entity.updated_at = ts;
                    }
                }
                _ => match kind.field(&name) {
                    Some(spec) => {
                        let coerced = spec
                            .ty
                            .coerce(value)
                            .map_err(|reason| HbnbError::InvalidAttribute {
                                name: name.clone(),
                                reason,
                            })?;
                        entity.fields.insert(spec.name, coerced);
                    }
                    None => entity.extra.set(name, value),
                },
            }
        }

        if created_from_payload && entity.updated_at < entity.created_at {
            entity.updated_at = entity.created_at;
        }
        Ok(entity)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Composite key `"<Class>.<id>"`
    pub fn key(&self) -> String {
        self.kind.key_for(&self.id)
    }

    pub fn extra(&self) -> &ExtraAttrs {
        &self.extra
    }

    /// Assigned schema fields, in name order
    pub fn assigned_fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    /// Assign one attribute
    ///
    /// Reserved names are rejected, schema fields are coerced to their declared
    /// type, and any other name is kept as an extra attribute.
    pub fn set_attr(&mut self, name: &str, value: Value) -> AttrOutcome {
        if RESERVED_ATTRS.contains(&name) {
            return AttrOutcome::Rejected(format!("{} cannot be modified", name));
        }
        if name.is_empty() {
            return AttrOutcome::Rejected("attribute name is empty".to_string());
        }
        match self.kind.field(name) {
            Some(spec) => match spec.ty.coerce(value) {
                Ok(coerced) => {
                    self.fields.insert(spec.name, coerced);
                    AttrOutcome::Applied
                }
                Err(reason) => AttrOutcome::Rejected(reason),
            },
            None => {
                self.extra.set(name.to_string(), value);
                AttrOutcome::Applied
            }
        }
    }

    /// Assigned value of a schema field or extra attribute
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).or_else(|| self.extra.get(name))
    }

    /// Like [`Entity::get`], but unassigned schema fields read as their default
    pub fn get_or_default(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.get(name) {
            return Some(value.clone());
        }
        self.kind.field(name).map(|spec| spec.ty.default_value())
    }

    /// String value of an attribute, if it is assigned and is a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Refresh `updated_at`
    pub fn touch(&mut self) {
        let ts = now();
        self.updated_at = if ts > self.created_at {
            ts
        } else {
            self.created_at
        };
    }

    /// Serialize every assigned attribute plus identity and the discriminator
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = self.extra.to_json_map();
        for (name, value) in &self.fields {
            map.insert((*name).to_string(), value.clone());
        }
        map.insert("id".to_string(), Value::String(self.id.clone()));
        map.insert(
            "created_at".to_string(),
            Value::String(format_timestamp(&self.created_at)),
        );
        map.insert(
            "updated_at".to_string(),
            Value::String(format_timestamp(&self.updated_at)),
        );
        map.insert(
            CLASS_FIELD.to_string(),
            Value::String(self.kind.as_str().to_string()),
        );
        map
    }

    /// Refresh `updated_at`, register with the storage and persist
    ///
    /// # Errors
    ///
    /// Propagates any failure of the storage's `new` or `save`.
    pub fn save(&mut self, storage: &mut dyn Storage) -> Result<()> {
        self.touch();
        storage.new(self)?;
        storage.save()
    }

    /// Remove this entity from the storage
    ///
    /// # Errors
    ///
    /// Propagates any failure of the storage's `delete`.
    pub fn delete(&self, storage: &mut dyn Storage) -> Result<()> {
        storage.delete(Some(self))
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item)?;
            }
            f.write_str("]")
        }
        other => write!(f, "{}", other),
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut attrs: BTreeMap<String, Value> = self.to_dict().into_iter().collect();
        attrs.remove(CLASS_FIELD);

        write!(f, "[{}] ({}) {{", self.kind, self.id)?;
        for (i, (name, value)) in attrs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: ", name)?;
            write_value(f, value)?;
        }
        f.write_str("}")
    }
}
