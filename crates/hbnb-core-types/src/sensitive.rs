//! Redacting wrapper for credentials
//!
//! Holds the relational backend's password so that printing a config with
//! `{:?}` or logging it never shows the value.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Value that prints as `***REDACTED***`
///
/// # Example
///
/// ```
/// use hbnb_core_types::Sensitive;
///
/// let password = Sensitive::new("hbnb_dev_pwd");
/// assert_eq!(format!("{:?}", password), "***REDACTED***");
/// assert_eq!(password.expose(), &"hbnb_dev_pwd");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// The raw value; only for handing to the database driver
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    #[allow(dead_code)]
    struct Login {
        user: String,
        password: Sensitive<String>,
    }

    #[test]
    fn test_redacted_inside_a_struct() {
        let login = Login {
            user: "hbnb_dev".to_string(),
            password: Sensitive::new("hbnb_dev_pwd".to_string()),
        };

        let printed = format!("{:?}", login);
        assert!(printed.contains("hbnb_dev"));
        assert!(printed.contains(REDACTED));
        assert!(!printed.contains("hbnb_dev_pwd"));
        assert_eq!(login.password.to_string(), REDACTED);
    }

    #[test]
    fn test_default_is_empty() {
        let secret: Sensitive<String> = Sensitive::default();
        assert!(secret.expose().is_empty());
    }
}
