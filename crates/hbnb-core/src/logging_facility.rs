//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! All output goes to stderr: stdout belongs to the interpreter.
//!
//! # Usage
//!
//! ```rust
//! use hbnb_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile, ENV_LOG_FORMAT};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
