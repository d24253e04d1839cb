//! Interpreter commands
//!
//! Each command validates its arguments in a fixed order, talks to the
//! storage and returns an [`Outcome`] for the console to print.

use hbnb_core::{AttrOutcome, Entity, EntityKind, Storage};

use crate::errors::ConsoleError;
use crate::parser::{Command, Target};

pub mod all;
pub mod count;
pub mod create;
pub mod destroy;
pub mod help;
pub mod show;
pub mod update;

pub type CommandResult = std::result::Result<Outcome, ConsoleError>;

/// What a command produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing to print
    Silent,
    /// Lines to print in order
    Lines(Vec<String>),
    /// Id of a newly created entity
    Created(String),
    Count(usize),
    Updated(UpdateReport),
    Exit,
}

/// Per-attribute result of an `update`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub key: String,
    pub outcomes: Vec<(String, AttrOutcome)>,
}

impl UpdateReport {
    /// Number of attributes that were assigned
    pub fn applied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_applied())
            .count()
    }

    /// Attributes that were refused, with the reason
    pub fn rejected(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            AttrOutcome::Rejected(reason) => Some((name.as_str(), reason.as_str())),
            AttrOutcome::Applied => None,
        })
    }
}

/// Stable name of a command, used as the log `op`
pub fn op_name(command: &Command) -> &'static str {
    match command {
        Command::Empty => "empty",
        Command::Quit => "quit",
        Command::Help(_) => "help",
        Command::Create { .. } => "create",
        Command::Show(_) => "show",
        Command::Destroy(_) => "destroy",
        Command::All(_) => "all",
        Command::Count(_) => "count",
        Command::Update { .. } => "update",
        Command::Unknown(_) => "unknown",
    }
}

/// `Class.id` of the instance a command addresses, when it names one
pub fn target_key(command: &Command) -> Option<String> {
    let target = match command {
        Command::Show(target) | Command::Destroy(target) => target,
        Command::Update { target, .. } => target,
        _ => return None,
    };
    match (&target.class, &target.id) {
        (Some(class), Some(id)) => Some(format!("{}.{}", class, id)),
        _ => None,
    }
}

/// Run one parsed command against `storage`
///
/// # Errors
///
/// Returns the `ConsoleError` the interpreter prints for this line.
pub fn execute(storage: &mut dyn Storage, command: Command) -> CommandResult {
    match command {
        Command::Empty => Ok(Outcome::Silent),
        Command::Quit => Ok(Outcome::Exit),
        Command::Help(topic) => Ok(help::execute(topic.as_deref())),
        Command::Create { class, params } => create::execute(storage, class.as_deref(), &params),
        Command::Show(target) => show::execute(storage, &target),
        Command::Destroy(target) => destroy::execute(storage, &target),
        Command::All(class) => all::execute(storage, class.as_deref()),
        Command::Count(class) => count::execute(storage, class.as_deref()),
        Command::Update { target, change } => update::execute(storage, &target, change),
        Command::Unknown(line) => Err(ConsoleError::UnknownSyntax(line)),
    }
}

/// Check a class name: missing first, then unknown
pub(crate) fn resolve_class(class: Option<&str>) -> Result<EntityKind, ConsoleError> {
    let class = class.ok_or(ConsoleError::ClassNameMissing)?;
    class
        .parse::<EntityKind>()
        .map_err(|_| ConsoleError::ClassDoesNotExist)
}

/// Resolve class, then id, then look the entity up
pub(crate) fn resolve_target(
    storage: &dyn Storage,
    target: &Target,
) -> Result<Entity, ConsoleError> {
    let kind = resolve_class(target.class.as_deref())?;
    let id = target.id.as_deref().ok_or(ConsoleError::InstanceIdMissing)?;
    storage.get(kind, id)?.ok_or(ConsoleError::NoInstanceFound)
}
