//! Subscriber installation
//!
//! Logs always go to stderr; stdout carries only interpreter output.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Environment variable choosing the log line format
pub const ENV_LOG_FORMAT: &str = "HBNB_LOG_FORMAT";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, `hbnb=warn` unless `RUST_LOG` says otherwise
    Development,
    /// JSON lines, `hbnb=info` unless `RUST_LOG` says otherwise
    Production,
    /// Nothing is printed; pair with `init_test_capture()` to collect events
    Test,
}

impl Profile {
    /// Profile for a `HBNB_LOG_FORMAT` value: `json` selects `Production`
    pub fn from_format(format: Option<&str>) -> Self {
        match format.map(str::trim) {
            Some(f) if f.eq_ignore_ascii_case("json") => Profile::Production,
            _ => Profile::Development,
        }
    }

    fn default_directive(&self) -> &'static str {
        match self {
            Profile::Production => "hbnb=info",
            Profile::Development | Profile::Test => "hbnb=warn",
        }
    }
}

static INIT_ONCE: Once = Once::new();

fn filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(profile.default_directive()))
}

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has any effect.
///
/// # Example
///
/// ```
/// use hbnb_core::logging_facility::{init, Profile};
///
/// init(Profile::from_format(Some("json")));
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter(profile))
            .init(),
        Profile::Production => tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter(profile))
            .init(),
        Profile::Test => tracing_subscriber::registry().init(),
    });
}
