//! `count <Class>`
//!
//! Unlike the other commands an unknown class reads "invalid class name".

use hbnb_core::{EntityKind, Storage};

use super::{CommandResult, Outcome};
use crate::errors::ConsoleError;

pub fn execute(storage: &dyn Storage, class: Option<&str>) -> CommandResult {
    let kind = class
        .ok_or(ConsoleError::ClassNameMissing)?
        .parse::<EntityKind>()
        .map_err(|_| ConsoleError::InvalidClassName)?;
    Ok(Outcome::Count(storage.count(Some(kind))?))
}
