#![allow(clippy::unwrap_used, clippy::expect_used)]

use hbnb_core::errors::{ExError, ExErrorKind, HbnbError};

#[test]
fn test_unknown_class_verifiable_by_kind() {
    let err = HbnbError::UnknownClass {
        class_name: "Spaceship".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::UnknownClass);
    assert_eq!(ex_err.code(), "ERR_UNKNOWN_CLASS");
    assert!(ex_err.message().contains("Spaceship"));
}

#[test]
fn test_transaction_error_keeps_op() {
    let err = HbnbError::BackendTransaction {
        op: "db_new".to_string(),
        message: "FOREIGN KEY constraint failed".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Transaction);
    assert_eq!(ex_err.op(), Some("db_new"));
}

#[test]
fn test_no_active_session_distinct_from_transaction() {
    let ex_err: ExError = HbnbError::NoActiveSession {
        op: "db_all".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::NoActiveSession);
    assert_ne!(ex_err.kind(), ExErrorKind::Transaction);
    assert_eq!(ex_err.code(), "ERR_NO_ACTIVE_SESSION");
}

#[test]
fn test_timestamp_and_attribute_errors_share_kind() {
    let ts: ExError = HbnbError::InvalidTimestamp {
        field: "created_at".to_string(),
        value: "soon".to_string(),
    }
    .into();
    let attr: ExError = HbnbError::InvalidAttribute {
        name: "max_guest".to_string(),
        reason: "expected integer".to_string(),
    }
    .into();

    assert_eq!(ts.kind(), ExErrorKind::InvalidAttribute);
    assert_eq!(attr.kind(), ExErrorKind::InvalidAttribute);
}

#[test]
fn test_error_kind_code_mapping() {
    // Each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::UnknownClass, "ERR_UNKNOWN_CLASS"),
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::InvalidAttribute, "ERR_INVALID_ATTRIBUTE"),
        (ExErrorKind::UnsupportedClass, "ERR_UNSUPPORTED_CLASS"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Config, "ERR_CONFIG"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_request_id_context() {
    let request_id = hbnb_core_types::RequestId::new();
    let ex_err = ExError::new(ExErrorKind::NotFound)
        .with_request_id(request_id.clone())
        .with_entity_key("State.s1");

    assert_eq!(ex_err.request_id(), Some(&request_id));
    assert_eq!(ex_err.entity_key(), Some("State.s1"));
}

#[test]
fn test_serde_json_error_converts() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: HbnbError = parse_err.into();
    assert!(matches!(err, HbnbError::Serialization { .. }));
}
