//! Static field schemas for every entity kind
//!
//! Each kind declares its class-specific fields once; the entity model,
//! the file backend and the relational backend all read from here.

use serde_json::Value;

use super::kind::EntityKind;

/// Declared type of a class-specific field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Str,
    Int,
    Float,
    StrList,
}

impl FieldType {
    /// Value an unassigned field reads as
    pub fn default_value(&self) -> Value {
        match self {
            FieldType::Str => Value::String(String::new()),
            FieldType::Int => Value::from(0_i64),
            FieldType::Float => Value::from(0.0_f64),
            FieldType::StrList => Value::Array(Vec::new()),
        }
    }

    /// Coerce a value into this type
    ///
    /// Strings accept numbers (rendered as text), floats accept integers.
    /// Everything else must already have the right shape.
    pub fn coerce(&self, value: Value) -> Result<Value, String> {
        match (self, value) {
            (FieldType::Str, Value::String(s)) => Ok(Value::String(s)),
            (FieldType::Str, Value::Number(n)) => Ok(Value::String(n.to_string())),
            (FieldType::Int, Value::Number(n)) if n.is_i64() => Ok(Value::Number(n)),
            (FieldType::Float, Value::Number(n)) => n
                .as_f64()
                .map(Value::from)
                .ok_or_else(|| format!("{} is not representable as float", n)),
            (FieldType::StrList, Value::Array(items)) => {
                if items.iter().all(Value::is_string) {
                    Ok(Value::Array(items))
                } else {
                    Err("expected a list of strings".to_string())
                }
            }
            (ty, other) => Err(format!("expected {}, got {}", ty.label(), other)),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FieldType::Str => "string",
            FieldType::Int => "integer",
            FieldType::Float => "float",
            FieldType::StrList => "list of strings",
        }
    }
}

/// One class-specific field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

const fn field(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec { name, ty }
}

const USER_FIELDS: &[FieldSpec] = &[
    field("email", FieldType::Str),
    field("password", FieldType::Str),
    field("first_name", FieldType::Str),
    field("last_name", FieldType::Str),
];

const STATE_FIELDS: &[FieldSpec] = &[field("name", FieldType::Str)];

const CITY_FIELDS: &[FieldSpec] = &[
    field("state_id", FieldType::Str),
    field("name", FieldType::Str),
];

const AMENITY_FIELDS: &[FieldSpec] = &[field("name", FieldType::Str)];

const PLACE_FIELDS: &[FieldSpec] = &[
    field("city_id", FieldType::Str),
    field("user_id", FieldType::Str),
    field("name", FieldType::Str),
    field("description", FieldType::Str),
    field("number_rooms", FieldType::Int),
    field("number_bathrooms", FieldType::Int),
    field("max_guest", FieldType::Int),
    field("price_by_night", FieldType::Int),
    field("latitude", FieldType::Float),
    field("longitude", FieldType::Float),
    field("amenity_ids", FieldType::StrList),
];

const REVIEW_FIELDS: &[FieldSpec] = &[
    field("place_id", FieldType::Str),
    field("user_id", FieldType::Str),
    field("text", FieldType::Str),
];

/// Names no caller may assign after construction
pub const RESERVED_ATTRS: &[&str] = &["id", "created_at", "updated_at", "__class__"];

impl EntityKind {
    /// Class-specific fields, in declaration order
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            EntityKind::BaseModel => &[],
            EntityKind::User => USER_FIELDS,
            EntityKind::State => STATE_FIELDS,
            EntityKind::City => CITY_FIELDS,
            EntityKind::Amenity => AMENITY_FIELDS,
            EntityKind::Place => PLACE_FIELDS,
            EntityKind::Review => REVIEW_FIELDS,
        }
    }

    /// Look up a class-specific field by name
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }
}
