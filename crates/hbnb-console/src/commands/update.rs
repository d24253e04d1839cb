//! `update <Class> <id> <attr> <value>` and the mapping form
//!
//! Each attribute is applied on its own; a refused one is reported in the
//! [`UpdateReport`] and the rest still go through.
//!
//! A malformed mapping is reported where the attribute name is checked, after
//! the instance lookup. `User.update("nope", {'a': x})` therefore prints
//! `** no instance found **` rather than the dictionary error.

use hbnb_core::{AttrOutcome, Storage};
use serde_json::Value;

use super::{resolve_target, CommandResult, Outcome, UpdateReport};
use crate::errors::ConsoleError;
use crate::parser::{Change, Target};

fn pairs(change: Change) -> Result<Vec<(String, Value)>, ConsoleError> {
    match change {
        Change::Missing => Err(ConsoleError::AttributeNameMissing),
        Change::NameOnly(_) => Err(ConsoleError::ValueMissing),
        Change::InvalidDict(reason) => {
            tracing::debug!(reason = %reason, "mapping literal rejected");
            Err(ConsoleError::InvalidDictionary)
        }
        Change::Dict(pairs) if pairs.is_empty() => Err(ConsoleError::AttributeNameMissing),
        Change::Dict(pairs) => Ok(pairs),
        Change::Single { name, value } => Ok(vec![(name, value)]),
    }
}

pub fn execute(storage: &mut dyn Storage, target: &Target, change: Change) -> CommandResult {
    let mut entity = resolve_target(storage, target)?;
    let pairs = pairs(change)?;

    let mut outcomes = Vec::with_capacity(pairs.len());
    for (name, value) in pairs {
        let outcome = entity.set_attr(&name, value);
        if let AttrOutcome::Rejected(reason) = &outcome {
            tracing::warn!(entity_key = %entity.key(), attr = %name, reason = %reason, "attribute rejected");
        }
        outcomes.push((name, outcome));
    }

    entity.save(storage)?;
    Ok(Outcome::Updated(UpdateReport {
        key: entity.key(),
        outcomes,
    }))
}
