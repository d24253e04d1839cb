#![allow(dead_code)]

use hbnb_console::Console;
use hbnb_core::Storage;
use hbnb_store::{DbConfig, DbStorage, FileStorage};
use std::path::Path;

pub type TestConsole = Console<Vec<u8>>;

/// Console over a file store at `dir/file.json`, already reloaded
pub fn file_console(dir: &Path) -> TestConsole {
    let mut storage = FileStorage::new(dir.join("file.json"));
    storage.reload().unwrap();
    Console::new(Box::new(storage), Vec::new())
}

/// Console over a fresh in-memory relational store with an open session
pub fn db_console() -> TestConsole {
    let config = DbConfig {
        database: ":memory:".to_string(),
        ..DbConfig::default()
    };
    let mut storage = DbStorage::open(&config, false).unwrap();
    storage.reload().unwrap();
    Console::new(Box::new(storage), Vec::new())
}

/// Run one line and return what it printed
pub fn exec(console: &mut TestConsole, line: &str) -> String {
    let before = console.output().len();
    console.onecmd(line).unwrap();
    String::from_utf8(console.output()[before..].to_vec()).unwrap()
}

/// Run one line that prints a single line, returning it without the newline
pub fn exec_line(console: &mut TestConsole, line: &str) -> String {
    exec(console, line).trim_end_matches('\n').to_string()
}
