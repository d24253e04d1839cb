#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{exec_line, file_console};
use hbnb_core::logging_facility::test_capture::init_test_capture;
use hbnb_core_types::schema::{EVENT_END, EVENT_START};
use tempfile::TempDir;

#[test]
fn test_command_and_storage_share_a_request_id() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let mut console = file_console(dir.path());

    exec_line(&mut console, r#"create Amenity name="Pool""#);

    let start = capture.last("create", EVENT_START).unwrap();
    let request_id = start.request_id.clone().unwrap();

    let ops: Vec<String> = capture
        .for_request(&request_id)
        .into_iter()
        .filter_map(|e| e.op)
        .collect();
    assert!(ops.iter().any(|op| op == "file_save"), "{:?}", ops);
    assert!(ops.iter().any(|op| op == "create"));
}

#[test]
fn test_input_errors_end_with_a_code() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let mut console = file_console(dir.path());

    exec_line(&mut console, "count Spaceship");

    let end = capture
        .events()
        .into_iter()
        .rev()
        .find(|e| {
            e.op.as_deref() == Some("count")
                && e.event.as_deref() == Some(EVENT_END)
                && e.field("err_code").is_some()
        })
        .unwrap();
    assert_eq!(end.field("err_code"), Some("ERR_UNKNOWN_CLASS"));
}

#[test]
fn test_lookup_miss_names_the_entity_key() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let mut console = file_console(dir.path());

    exec_line(&mut console, "show Review 7c1e-missing");

    let end = capture
        .events()
        .into_iter()
        .rev()
        .find(|e| {
            e.op.as_deref() == Some("show")
                && e.field("entity_key") == Some("Review.7c1e-missing")
        })
        .unwrap();
    assert_eq!(end.event.as_deref(), Some(EVENT_END));
    assert_eq!(end.field("err_code"), Some("ERR_NOT_FOUND"));
    assert!(end.request_id.is_some());
}
