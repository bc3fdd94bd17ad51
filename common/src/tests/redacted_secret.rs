// Unit tests for RedactedSecret: the access token and basic-auth password
// must never leak through formatting or serialization.

use crate::RedactedSecret;

/// **VALUE**: Verifies Debug and Display never print the secret.
///
/// **WHY THIS MATTERS**: `ClientConfig` derives Debug and is logged when
/// construction fails. A leaking Debug impl would write the NAPI access token
/// into the CMS log.
///
/// **BUG THIS CATCHES**: Would catch a `#[derive(Debug)]` replacing the manual impl.
#[test]
fn given_secret_when_formatted_then_value_is_redacted() {
    // GIVEN: A secret access token
    let secret = RedactedSecret::new("s3cr3t-token");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{secret:?}");
    let display = format!("{secret}");

    // THEN: Neither contains the raw value
    assert!(!debug.contains("s3cr3t-token"));
    assert!(!display.contains("s3cr3t-token"));
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies serialization is refused instead of silently emitting the value.
///
/// **BUG THIS CATCHES**: Would catch a derived `Serialize` on a struct holding a secret.
#[test]
fn given_secret_when_serialized_then_returns_error() {
    // GIVEN: A secret
    let secret = RedactedSecret::new("hunter2");

    // WHEN: Serializing to JSON
    let result = serde_json::to_string(&secret);

    // THEN: Serialization fails and the error names the type, not the value
    let err = result.expect_err("serialization must fail");
    let message = err.to_string();
    assert!(message.contains("RedactedSecret"));
    assert!(!message.contains("hunter2"));
}

#[test]
fn given_secret_when_exposed_then_returns_raw_value() {
    let secret = RedactedSecret::from(String::from("abc"));

    assert_eq!(secret.expose(), "abc");
    assert_eq!(secret.len(), 3);
    assert!(!secret.is_empty());
    assert!(RedactedSecret::default().is_empty());
}
