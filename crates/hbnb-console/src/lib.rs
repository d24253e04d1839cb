//! HBNB command interpreter
//!
//! Line-oriented shell over any `Storage` backend. Lines are parsed into
//! [`parser::Command`]s, run by [`commands::execute`] and printed by
//! [`console::Console`].

pub mod commands;
pub mod console;
pub mod errors;
pub mod literal;
pub mod parser;

pub use commands::{Outcome, UpdateReport};
pub use console::{Console, Flow, PROMPT};
pub use errors::ConsoleError;
pub use parser::{parse_line, Command};
