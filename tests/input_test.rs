//! Tests for draw input and stored assignment files

use santa_draw::draw::{DrawEngine, MemberId};
use santa_draw::error::{Classify, Error, ErrorCategory};
use santa_draw::input::{load_assignments, DrawInput};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_json_input_end_to_end() {
    let file = write_temp(
        ".json",
        r#"{
            "members": ["ana", "ben", "cai", "dee"],
            "exclusions": [
                {"giver": "ana", "blocked": "ben"},
                {"giver": "ben", "blocked": "ana"}
            ],
            "previous_assignments": [{"giver": "cai", "receiver": "dee"}]
        }"#,
    );

    let request = DrawInput::from_path(file.path()).unwrap().into_request();
    let outcome = DrawEngine::default().with_seed(1).draw(&request).unwrap();

    assert!(outcome.assignments.verify(&request).is_ok());
    assert_ne!(
        outcome.assignments.receiver_of(&MemberId::new("cai")),
        Some(&MemberId::new("dee"))
    );
}

#[test]
fn test_toml_input_infeasible() {
    let file = write_temp(
        ".toml",
        r#"
members = ["a", "b"]

[[exclusions]]
giver = "a"
blocked = "b"
"#,
    );

    let request = DrawInput::from_path(file.path()).unwrap().into_request();
    let err: Error = DrawEngine::default().draw(&request).unwrap_err().into();

    assert_eq!(err.category(), ErrorCategory::Constraints);
    assert!(err.user_message().contains("exclusions"));
}

#[test]
fn test_unsupported_extension() {
    let file = write_temp(".yaml", "members: [a, b]");
    let err = DrawInput::from_path(file.path()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert_eq!(err.category(), ErrorCategory::Input);
}

#[test]
fn test_missing_file() {
    let err = DrawInput::from_path(std::path::Path::new("/nonexistent/event.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_load_and_verify_stored_assignments() {
    let input = write_temp(".json", r#"{"members": ["a", "b", "c"]}"#);
    let good = write_temp(
        ".json",
        r#"[
            {"giver": "a", "receiver": "b"},
            {"giver": "b", "receiver": "c"},
            {"giver": "c", "receiver": "a"}
        ]"#,
    );
    let bad = write_temp(
        ".toml",
        r#"
[[assignments]]
giver = "a"
receiver = "b"

[[assignments]]
giver = "b"
receiver = "a"

[[assignments]]
giver = "c"
receiver = "c"
"#,
    );

    let request = DrawInput::from_path(input.path()).unwrap().into_request();
    assert!(load_assignments(good.path()).unwrap().verify(&request).is_ok());

    let err: Error = load_assignments(bad.path())
        .unwrap()
        .verify(&request)
        .unwrap_err()
        .into();
    assert_eq!(err.category(), ErrorCategory::Integrity);
}
