//! HBNB console
//!
//! Interactive shell over the configured storage backend

use clap::Parser;
use hbnb_core::logging_facility::{init, Profile, ENV_LOG_FORMAT};
use hbnb_console::Console;
use hbnb_store::{open_storage, StorageConfig};
use std::io::{self, IsTerminal};

#[derive(Debug, Parser)]
#[command(name = "hbnb")]
#[command(about = "HBNB - command interpreter for the HBNB data store", long_about = None)]
struct Cli {}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorageConfig::from_env()?;
    let storage = open_storage(&config)?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut console = Console::new(storage, io::stdout().lock());
    console.run(stdin.lock(), interactive)?;

    let (mut storage, _) = console.into_parts();
    storage.close()?;
    Ok(())
}

fn main() {
    let _cli = Cli::parse();
    dotenvy::dotenv().ok();

    let format = std::env::var(ENV_LOG_FORMAT).ok();
    init(Profile::from_format(format.as_deref()));

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
