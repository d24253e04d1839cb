#![allow(clippy::unwrap_used, clippy::expect_used)]

use hbnb_core::errors::HbnbError;
use hbnb_core::logging_facility::test_capture::init_test_capture;
use hbnb_core::{log_op_end, log_op_error, log_op_start};
use hbnb_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events();
    let start_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(
        end_events[0].fields.get("duration_ms"),
        Some(&"42".to_string())
    );
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = HbnbError::CorruptStore {
        location: "file.json".to_string(),
        reason: "unknown class Spaceship".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(
        error_event.fields.get("err_code"),
        Some(&"ERR_CORRUPT_STORE".to_string())
    );
    assert!(error_event
        .fields
        .get("err_message")
        .is_some_and(|m| m.contains("Spaceship")));
}

#[test]
fn test_boundary_ownership_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_ownership_unique_4";

    log_op_start!(op_name, entity_key = "State.s1");
    log_op_end!(op_name, duration_ms = 3);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END)
    });

    assert_eq!(starts, 1, "Should have exactly one start event");
    assert_eq!(ends, 1, "Should have exactly one end event");
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_5";

    log_op_start!(op_name, entity_kind = "Place", object_count = 7);

    let events = capture.events();
    let start_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have start event");

    assert_eq!(
        start_event.fields.get("entity_kind"),
        Some(&"Place".to_string())
    );
    assert_eq!(
        start_event.fields.get("object_count"),
        Some(&"7".to_string())
    );
}

#[test]
#[should_panic(expected = "no nonexistent_op_truly_unique_999/start event")]
fn test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_request_id_comes_from_enclosing_span() {
    let capture = init_test_capture();

    let span = tracing::info_span!("command", request_id = "req-capture-unique-6");
    span.in_scope(|| {
        log_op_start!("test_request_span_unique_6", entity_key = "State.s1");
    });
    log_op_end!("test_request_span_unique_6", duration_ms = 1);

    let start = capture.last("test_request_span_unique_6", EVENT_START).unwrap();
    assert_eq!(start.request_id.as_deref(), Some("req-capture-unique-6"));
    assert_eq!(start.field("entity_key"), Some("State.s1"));

    let end = capture.last("test_request_span_unique_6", EVENT_END).unwrap();
    assert_eq!(end.request_id, None);
    assert_eq!(capture.for_request("req-capture-unique-6").len(), 1);
}
