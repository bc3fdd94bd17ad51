// Unit tests for napi-core.
// HTTP round trips against a mock server live in integration_tests/.

mod config;
mod domain;
mod memory_cache;

use crate::config::{ConfigBag, keys};

/// A bag with every required key set and nothing optional.
pub(crate) fn valid_bag() -> ConfigBag {
    ConfigBag::new()
        .with(keys::USER_ID, "42")
        .with(keys::ACCESS_TOKEN, "token-abc")
        .with(keys::HOST, "napi.example.org")
        .with(keys::PORT, "443")
        .with(keys::PATH, "/api/")
        .with(keys::PROTOCOL, "https")
        .with(keys::VERSION, "v1")
}
