use crate::ErrorLocation;

#[track_caller]
fn capture() -> ErrorLocation {
    ErrorLocation::caller()
}

/// **VALUE**: Verifies `ErrorLocation::caller()` reports the caller, not itself.
///
/// **WHY THIS MATTERS**: Every error in the workspace relies on this to point at
/// the line that raised it. Reporting `error_location.rs` would make every error
/// look like it came from the same place.
#[test]
fn given_track_caller_chain_when_captured_then_points_at_call_site() {
    // GIVEN/WHEN: Capturing through a #[track_caller] helper
    let expected_line = line!() + 1;
    let location = capture();

    // THEN: The location is this test file and line
    assert!(location.file.ends_with("error_location.rs"));
    assert!(location.file.contains("tests"));
    assert_eq!(location.line, expected_line);
}

#[test]
fn given_location_when_displayed_then_uses_bracketed_format() {
    let location = ErrorLocation {
        file: "src/lib.rs",
        line: 7,
        column: 3,
    };

    assert_eq!(location.to_string(), "[src/lib.rs:7:3]");
}
