//! `destroy <Class> <id>`

use hbnb_core::Storage;

use super::{resolve_target, CommandResult, Outcome};
use crate::parser::Target;

pub fn execute(storage: &mut dyn Storage, target: &Target) -> CommandResult {
    let entity = resolve_target(storage, target)?;
    entity.delete(storage)?;
    storage.save()?;
    tracing::debug!(entity_key = %entity.key(), "destroyed");
    Ok(Outcome::Silent)
}
