//! `create <Class> [key=value ...]`

use hbnb_core::{AttrOutcome, Entity, Storage};
use serde_json::Value;

use super::{resolve_class, CommandResult, Outcome};
use crate::literal::parse_number;

/// Read one `key=value` parameter
///
/// A double-quoted value is a string with `\"` unescaped and underscores
/// turned into spaces. Anything else must be a number or the pair is dropped.
pub fn parse_param(param: &str) -> Option<(&str, Value)> {
    let (key, raw) = param.split_once('=')?;
    if key.is_empty() {
        return None;
    }

    if raw.starts_with('"') {
        let text = raw
            .trim_matches('"')
            .replace("\\\"", "\"")
            .replace('_', " ");
        return Some((key, Value::String(text)));
    }
    parse_number(raw).map(|value| (key, value))
}

pub fn execute(storage: &mut dyn Storage, class: Option<&str>, params: &[String]) -> CommandResult {
    let kind = resolve_class(class)?;
    let mut entity = Entity::new(kind);

    for param in params {
        let Some((key, value)) = parse_param(param) else {
            tracing::debug!(param = %param, "skipping create parameter");
            continue;
        };
        if let AttrOutcome::Rejected(reason) = entity.set_attr(key, value) {
            tracing::warn!(entity_kind = %kind, attr = key, reason = %reason, "attribute rejected");
        }
    }

    storage.new(&mut entity)?;
    storage.save()?;
    Ok(Outcome::Created(entity.id().to_string()))
}
