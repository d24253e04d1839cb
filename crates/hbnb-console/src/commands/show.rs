//! `show <Class> <id>`

use hbnb_core::Storage;

use super::{resolve_target, CommandResult, Outcome};
use crate::parser::Target;

pub fn execute(storage: &dyn Storage, target: &Target) -> CommandResult {
    let entity = resolve_target(storage, target)?;
    Ok(Outcome::Lines(vec![entity.to_string()]))
}
