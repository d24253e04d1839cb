//! The interactive loop
//!
//! Reads one line at a time, runs it against the injected storage and writes
//! the result to a generic writer. No command error ends the loop; only
//! `quit`, `EOF` or the end of input do.

use hbnb_core::errors::ExError;
use hbnb_core::{log_op_end, log_op_error, log_op_start, Storage};
use hbnb_core_types::RequestId;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use crate::commands::{self, op_name, target_key, CommandResult, Outcome};
use crate::parser::{parse_line, Command};

pub const PROMPT: &str = "(hbnb) ";

/// Whether the loop keeps reading after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Console<W: Write> {
    storage: Box<dyn Storage>,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(storage: Box<dyn Storage>, out: W) -> Self {
        Self { storage, out }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Consume the console, returning the storage and the writer
    pub fn into_parts(self) -> (Box<dyn Storage>, W) {
        (self.storage, self.out)
    }

    /// Run a parsed command without printing anything
    pub fn execute(&mut self, command: Command) -> CommandResult {
        commands::execute(self.storage.as_mut(), command)
    }

    /// Parse, run and print one line
    ///
    /// # Errors
    ///
    /// Only a failed write to the output is an error.
    pub fn onecmd(&mut self, line: &str) -> io::Result<Flow> {
        let command = parse_line(line);
        if command == Command::Empty {
            return Ok(Flow::Continue);
        }

        let request_id = RequestId::new();
        let span = tracing::info_span!("command", request_id = %request_id);
        let _entered = span.enter();

        let op = op_name(&command);
        let entity_key = target_key(&command);
        let start = Instant::now();
        log_op_start!(op);

        match self.execute(command) {
            Ok(outcome) => {
                log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
                self.print(outcome)
            }
            Err(err) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                let mut ex_err = ExError::from(err.clone()).with_request_id(request_id);
                if let Some(key) = entity_key {
                    ex_err = ex_err.with_entity_key(key);
                }
                if err.is_storage() {
                    log_op_error!(op, ex_err, duration_ms = duration_ms);
                } else {
                    log_op_end!(
                        op,
                        duration_ms = duration_ms,
                        err_code = ex_err.code(),
                        entity_key = ex_err.entity_key()
                    );
                }
                writeln!(self.out, "{}", err)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn print(&mut self, outcome: Outcome) -> io::Result<Flow> {
        match outcome {
            Outcome::Silent | Outcome::Updated(_) => {}
            Outcome::Lines(lines) => {
                for line in lines {
                    writeln!(self.out, "{}", line)?;
                }
            }
            Outcome::Created(id) => writeln!(self.out, "{}", id)?,
            Outcome::Count(n) => writeln!(self.out, "{}", n)?,
            Outcome::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Read and run lines until `quit`, `EOF` or the end of `input`
    ///
    /// With `interactive` the prompt is written before every line. Bytes that
    /// are not UTF-8 are replaced, so such a line fails as one command.
    ///
    /// # Errors
    ///
    /// Fails when reading input or writing output fails.
    pub fn run<R: BufRead>(&mut self, mut input: R, interactive: bool) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            if interactive {
                write!(self.out, "{}", PROMPT)?;
                self.out.flush()?;
            }

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                if interactive {
                    writeln!(self.out)?;
                }
                return Ok(());
            }

            let line = String::from_utf8_lossy(&buf);
            if self.onecmd(&line)? == Flow::Exit {
                return Ok(());
            }
        }
    }
}
