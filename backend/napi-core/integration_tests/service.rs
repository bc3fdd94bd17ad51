use napi_core::config::keys;
use napi_core::{ObjectType, service};

use std::env;

use serde_json::Value;
use serial_test::serial;

const REQUIRED: [(&str, &str); 5] = [
    (keys::HOST, "napi.example.org"),
    (keys::PORT, "443"),
    (keys::PATH, "api"),
    (keys::PROTOCOL, "https"),
    (keys::VERSION, "v1"),
];

fn clear_napi_env() {
    for key in keys::FLAT {
        // SAFETY: serialised test; no other thread reads the environment meanwhile.
        unsafe { env::remove_var(key) };
    }
    for (env_key, _) in keys::NESTED_ENV {
        unsafe { env::remove_var(env_key) };
    }
    unsafe { env::remove_var(napi_core::config::CONFIG_FILE_ENV) };
}

/// **VALUE**: Verifies the process-wide accessor builds once from the environment and
/// then always hands out the same instance.
///
/// **WHY THIS MATTERS**: Plugins call `service::client()` from many places per request.
/// A failed first attempt (config not yet present) must not poison later calls, and a
/// successful one must never be repeated.
///
/// **BUG THIS CATCHES**: Would catch failures being memoized, or a new client being
/// built on every call.
#[tokio::test]
#[serial]
async fn given_environment_when_client_accessed_then_builds_once_and_is_memoized() {
    // GIVEN: No NAPI configuration in the environment
    clear_napi_env();

    // WHEN: Accessing the client
    let missing = service::client().await;

    // THEN: Configuration error
    assert!(missing.unwrap_err().is_configuration());

    // GIVEN: The required keys are now set
    for (key, value) in REQUIRED {
        unsafe { env::set_var(key, value) };
    }

    // WHEN: Accessing twice
    let first = service::client().await.unwrap();
    let second = service::client().await.unwrap();

    // THEN: Identical instance with the default timeout
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.timeout().map(|timeout| timeout.as_secs()), Some(20));
    assert_eq!(first.base_url().as_str(), "https://napi.example.org/api/v1/");

    // AND: Repositories resolve through the same client
    let repository = service::repository::<Value>("event").await.unwrap();
    assert_eq!(Some(repository.object_type()), ObjectType::from_name("Event"));
    assert_eq!(repository.client().base_url(), first.base_url());

    let unknown = service::repository::<Value>("doesnotexist").await;
    assert!(unknown.unwrap_err().is_lookup());

    clear_napi_env();
}

#[test]
fn given_names_when_queries_requested_then_resolve_or_fail_with_lookup() {
    assert_eq!(
        service::query("institutionType").unwrap().object_type(),
        ObjectType::InstitutionType
    );
    assert!(service::query("doesnotexist").unwrap_err().is_lookup());
}
