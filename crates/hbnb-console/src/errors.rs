//! Interpreter errors
//!
//! `Display` is exactly the line the interpreter prints. None of these end
//! the loop.

use hbnb_core::errors::{ExError, ExErrorKind, HbnbError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsoleError {
    #[error("** class name missing **")]
    ClassNameMissing,

    #[error("** class doesn't exist **")]
    ClassDoesNotExist,

    /// `count` reports an unknown class with its own wording
    #[error("** invalid class name **")]
    InvalidClassName,

    #[error("** instance id missing **")]
    InstanceIdMissing,

    #[error("** no instance found **")]
    NoInstanceFound,

    #[error("** attribute name missing **")]
    AttributeNameMissing,

    #[error("** value missing **")]
    ValueMissing,

    #[error("** invalid dictionary format **")]
    InvalidDictionary,

    #[error("*** Unknown syntax: {0}")]
    UnknownSyntax(String),

    #[error("** storage error: {0} **")]
    Storage(#[from] HbnbError),
}

impl ConsoleError {
    /// Canonical kind for this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            ConsoleError::ClassNameMissing
            | ConsoleError::InstanceIdMissing
            | ConsoleError::AttributeNameMissing
            | ConsoleError::ValueMissing
            | ConsoleError::UnknownSyntax(_) => ExErrorKind::InvalidInput,
            ConsoleError::ClassDoesNotExist | ConsoleError::InvalidClassName => {
                ExErrorKind::UnknownClass
            }
            ConsoleError::NoInstanceFound => ExErrorKind::NotFound,
            ConsoleError::InvalidDictionary => ExErrorKind::MalformedLiteral,
            ConsoleError::Storage(err) => err.kind(),
        }
    }

    /// Whether this is a storage failure rather than a user input problem
    pub fn is_storage(&self) -> bool {
        matches!(self, ConsoleError::Storage(_))
    }
}

impl From<ConsoleError> for ExError {
    fn from(err: ConsoleError) -> Self {
        match err {
            ConsoleError::Storage(inner) => inner.into(),
            other => ExError::new(other.kind()).with_message(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_exact() {
        assert_eq!(
            ConsoleError::ClassDoesNotExist.to_string(),
            "** class doesn't exist **"
        );
        assert_eq!(
            ConsoleError::UnknownSyntax("foo bar".to_string()).to_string(),
            "*** Unknown syntax: foo bar"
        );
    }

    #[test]
    fn test_storage_error_keeps_kind() {
        let err = ConsoleError::from(HbnbError::NoActiveSession {
            op: "db_all".to_string(),
        });
        assert!(err.is_storage());
        assert_eq!(err.kind(), ExErrorKind::NoActiveSession);

        let ex: ExError = err.into();
        assert_eq!(ex.op(), Some("db_all"));
    }

    #[test]
    fn test_lookup_miss_distinct_from_input_error() {
        assert_eq!(ConsoleError::NoInstanceFound.kind(), ExErrorKind::NotFound);
        assert_eq!(
            ConsoleError::InstanceIdMissing.kind(),
            ExErrorKind::InvalidInput
        );
    }
}
