pub mod entity;
pub mod extra;
pub mod kind;
pub mod schema;

pub use entity::{AttrOutcome, Entity};
pub use extra::ExtraAttrs;
pub use kind::EntityKind;
pub use schema::{FieldSpec, FieldType};
