use crate::HttpStatusCode;

#[test]
fn given_status_codes_when_classified_then_ranges_are_respected() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(404).is_client_error());
    assert!(!HttpStatusCode(404).is_server_error());
    assert!(HttpStatusCode(503).is_server_error());
    assert!(HttpStatusCode::from(401).is_auth_failure());
    assert!(HttpStatusCode::from(403).is_auth_failure());
    assert!(!HttpStatusCode::from(404).is_auth_failure());
    assert_eq!(HttpStatusCode(502).to_string(), "502");
}
