//! Small types shared by every hbnb crate
//!
//! - [`RequestId`] correlates the log lines of one interpreter command
//! - [`Sensitive`] keeps credentials out of `Debug` output
//! - [`schema`] names the fields and events of structured log lines

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::RequestId;
pub use sensitive::Sensitive;
