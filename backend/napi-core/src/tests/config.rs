// Unit tests for ConfigBag and ClientConfig validation

use super::valid_bag;
use crate::config::client::DEFAULT_TIMEOUT_SECS;
use crate::config::{ApplicationContext, CacheEndpoint, ClientConfig, ConfigBag, keys};
use crate::error::ConfigError;

use std::path::Path;
use std::time::Duration;

/// **VALUE**: Verifies each required key is enforced on its own.
///
/// **WHY THIS MATTERS**: A client built without host, port, path, protocol or
/// version would produce nonsense URLs and fail on every request instead of
/// failing once, loudly, at construction.
///
/// **BUG THIS CATCHES**: Would catch a required key being dropped from the check.
#[test]
fn given_bag_missing_required_key_when_validated_then_returns_missing_key() {
    for key in [keys::HOST, keys::PORT, keys::PATH, keys::PROTOCOL, keys::VERSION] {
        // GIVEN: A valid bag with one required key removed
        let mut bag = valid_bag();
        bag.remove(key);

        // WHEN: Validating
        let result = ClientConfig::from_bag(&bag, ApplicationContext::Production);

        // THEN: The missing key is reported
        match result {
            Err(ConfigError::MissingKey { key: missing, .. }) => assert_eq!(missing, key),
            other => panic!("expected MissingKey for {key}, got {other:?}"),
        }
    }
}

/// **VALUE**: Verifies blank values count as missing.
///
/// **BUG THIS CATCHES**: Would catch a presence-only check letting `""` through.
#[test]
fn given_blank_required_value_when_validated_then_returns_missing_key() {
    // GIVEN: A bag whose host is whitespace
    let bag = valid_bag().with(keys::HOST, "  ");

    // WHEN: Validating
    let result = ClientConfig::from_bag(&bag, ApplicationContext::Production);

    // THEN: Host is reported missing
    assert!(matches!(
        result,
        Err(ConfigError::MissingKey { key: keys::HOST, .. })
    ));
}

#[test]
fn given_no_timeout_key_when_validated_then_timeout_defaults_to_twenty_seconds() {
    let config = ClientConfig::from_bag(&valid_bag(), ApplicationContext::Production).unwrap();

    assert_eq!(DEFAULT_TIMEOUT_SECS, 20);
    assert_eq!(config.timeout, Some(Duration::from_secs(20)));
}

#[test]
fn given_timeout_key_when_validated_then_timeout_is_used() {
    let bag = valid_bag().with(keys::TIMEOUT, "5");

    let config = ClientConfig::from_bag(&bag, ApplicationContext::Production).unwrap();

    assert_eq!(config.timeout, Some(Duration::from_secs(5)));
}

/// **VALUE**: Verifies a malformed timeout is rejected instead of silently becoming 0.
///
/// **WHY THIS MATTERS**: A typo in the timeout should fail loudly at construction
/// instead of quietly changing how long requests may take.
#[test]
fn given_non_numeric_timeout_when_validated_then_returns_invalid_value() {
    let bag = valid_bag().with(keys::TIMEOUT, "soon");

    let result = ClientConfig::from_bag(&bag, ApplicationContext::Production);

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { key: keys::TIMEOUT, .. })
    ));
}

/// **VALUE**: Verifies a timeout of 0 means "no timeout" rather than a zero-length one.
///
/// **WHY THIS MATTERS**: A zero-length deadline fails every request before the
/// server can answer, so a client configured with 0 would never see a response.
///
/// **BUG THIS CATCHES**: Would catch 0 being passed through as `Duration::ZERO`.
#[test]
fn given_zero_timeout_when_validated_then_timeout_is_disabled() {
    // GIVEN: NDK_NAPI_TIMEOUT = 0
    let bag = valid_bag().with(keys::TIMEOUT, "0");

    // WHEN: Validating
    let config = ClientConfig::from_bag(&bag, ApplicationContext::Production).unwrap();

    // THEN: No timeout is configured
    assert_eq!(config.timeout, None);
}

#[test]
fn given_invalid_port_or_protocol_when_validated_then_returns_invalid_value() {
    let bad_port = valid_bag().with(keys::PORT, "https");
    let bad_protocol = valid_bag().with(keys::PROTOCOL, "ftp");

    assert!(matches!(
        ClientConfig::from_bag(&bad_port, ApplicationContext::Production),
        Err(ConfigError::InvalidValue { key: keys::PORT, .. })
    ));
    assert!(matches!(
        ClientConfig::from_bag(&bad_protocol, ApplicationContext::Production),
        Err(ConfigError::InvalidValue { key: keys::PROTOCOL, .. })
    ));
}

#[test]
fn given_valid_bag_when_base_url_built_then_joins_path_and_version() {
    let config = ClientConfig::from_bag(&valid_bag(), ApplicationContext::Production).unwrap();

    let base_url = config.base_url().unwrap();

    assert_eq!(base_url.as_str(), "https://napi.example.org/api/v1/");
}

#[test]
fn given_nested_path_when_base_url_built_then_keeps_every_segment() {
    let bag = valid_bag()
        .with(keys::PROTOCOL, "HTTP")
        .with(keys::PORT, "8080")
        .with(keys::PATH, "content/api")
        .with(keys::VERSION, "/v2/");
    let config = ClientConfig::from_bag(&bag, ApplicationContext::Production).unwrap();

    let base_url = config.base_url().unwrap();

    assert_eq!(base_url.as_str(), "http://napi.example.org:8080/content/api/v2/");
}

#[test]
fn given_http_auth_username_when_validated_then_pairs_with_password() {
    let bag = valid_bag()
        .with(keys::HTTP_AUTH_USERNAME, "editor")
        .with(keys::HTTP_AUTH_PASSWORD, "pw");

    let config = ClientConfig::from_bag(&bag, ApplicationContext::Production).unwrap();

    let auth = config.http_auth.expect("basic auth should be configured");
    assert_eq!(auth.username, "editor");
    assert_eq!(auth.password.expose(), "pw");
}

/// **VALUE**: Verifies the cache backend is only enabled when host AND port are set.
///
/// **BUG THIS CATCHES**: Would catch a half-configured backend trying to connect
/// to a default port and failing client construction.
#[test]
fn given_partial_cache_endpoint_when_validated_then_cache_is_disabled() {
    let host_only = valid_bag().with(keys::REDIS_CACHE_HOST, "cache.internal");
    let both = host_only.clone().with(keys::REDIS_CACHE_PORT, "6379");

    let without = ClientConfig::from_bag(&host_only, ApplicationContext::Production).unwrap();
    let with = ClientConfig::from_bag(&both, ApplicationContext::Production).unwrap();

    assert_eq!(without.cache, None);
    assert_eq!(
        with.cache,
        Some(CacheEndpoint {
            host: "cache.internal".to_string(),
            port: 6379,
        })
    );
}

#[test]
fn given_log_file_when_not_in_development_then_request_log_is_disabled() {
    let bag = valid_bag().with(keys::LOG_FILE, "/tmp/napi.log");

    let production = ClientConfig::from_bag(&bag, ApplicationContext::Production).unwrap();
    let development = ClientConfig::from_bag(&bag, ApplicationContext::Development).unwrap();

    assert_eq!(production.request_log_file(), None);
    assert_eq!(
        development.request_log_file(),
        Some(Path::new("/tmp/napi.log"))
    );
}

/// **VALUE**: Verifies TOML files flatten nested tables into dotted keys.
///
/// **WHY THIS MATTERS**: The cache endpoint lives in a `[NDK_REDIS_CACHE]` table;
/// if flattening breaks, the cache is silently never enabled.
#[test]
fn given_toml_with_cache_table_when_parsed_then_keys_are_flattened() {
    // GIVEN: A TOML document mixing strings, integers and a table
    let contents = r#"
        NDK_NAPI_HOST = "napi.example.org"
        NDK_NAPI_PORT = 443
        NDK_NAPI_TIMEOUT = 7

        [NDK_REDIS_CACHE]
        host = "cache.internal"
        port = 6379
    "#;

    // WHEN: Parsing
    let bag = ConfigBag::from_toml_str(contents, Path::new("napi.toml")).unwrap();

    // THEN: Every value is present as a string under its flattened key
    assert_eq!(bag.get(keys::HOST), Some("napi.example.org"));
    assert_eq!(bag.get(keys::PORT), Some("443"));
    assert_eq!(bag.get(keys::TIMEOUT), Some("7"));
    assert_eq!(bag.get(keys::REDIS_CACHE_HOST), Some("cache.internal"));
    assert_eq!(bag.get(keys::REDIS_CACHE_PORT), Some("6379"));
}

#[test]
fn given_malformed_toml_when_parsed_then_returns_parse_error() {
    let result = ConfigBag::from_toml_str("NDK_NAPI_HOST = ", Path::new("broken.toml"));

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn given_missing_file_when_loaded_then_returns_read_error() {
    let result = ConfigBag::load(Path::new("/nonexistent/napi.toml"));

    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn given_environment_pairs_when_collected_then_only_known_keys_are_kept() {
    let vars = vec![
        ("NDK_NAPI_HOST", "napi.example.org"),
        ("NDK_REDIS_CACHE_PORT", "6379"),
        ("PATH", "/usr/bin"),
    ];

    let bag = ConfigBag::from_vars(vars);

    assert_eq!(bag.len(), 2);
    assert_eq!(bag.get(keys::HOST), Some("napi.example.org"));
    assert_eq!(bag.get(keys::REDIS_CACHE_PORT), Some("6379"));
    assert!(!bag.contains("PATH"));
}

#[test]
fn given_bag_with_secrets_when_debug_formatted_then_secrets_are_redacted() {
    let bag = valid_bag().with(keys::HTTP_AUTH_PASSWORD, "pw-123");

    let debug = format!("{bag:?}");

    assert!(!debug.contains("token-abc"));
    assert!(!debug.contains("pw-123"));
    assert!(debug.contains("napi.example.org"));
}

#[test]
fn given_two_bags_when_merged_then_later_values_win() {
    let mut base = ConfigBag::new().with(keys::HOST, "file.example.org").with(keys::PORT, "80");
    let overrides = ConfigBag::new().with(keys::HOST, "env.example.org");

    base.merge(overrides);

    assert_eq!(base.get(keys::HOST), Some("env.example.org"));
    assert_eq!(base.get(keys::PORT), Some("80"));
}
