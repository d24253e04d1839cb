//! `all [<Class>]`

use hbnb_core::{EntityKind, Storage};

use super::{CommandResult, Outcome};
use crate::errors::ConsoleError;

pub fn execute(storage: &dyn Storage, class: Option<&str>) -> CommandResult {
    let kind = class
        .map(|name| {
            name.parse::<EntityKind>()
                .map_err(|_| ConsoleError::ClassDoesNotExist)
        })
        .transpose()?;

    let lines = storage
        .all(kind)?
        .values()
        .map(ToString::to_string)
        .collect();
    Ok(Outcome::Lines(lines))
}
