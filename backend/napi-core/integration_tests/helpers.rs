//! Test helpers for NAPI integration tests.
//!
//! - Configuration bags pointing at a wiremock server
//! - Canned collection responses

use napi_core::config::{ApplicationContext, ClientConfig, ConfigBag, keys};
use napi_core::NapiClient;
use napi_core::cache::CacheProviders;

use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_USER_ID: &str = "4711";
pub const TEST_ACCESS_TOKEN: &str = "test-token-12345";
pub const EVENTS_PATH: &str = "/api/v1/events";

/// Config bag targeting `server` under `/api/v1/`.
pub fn bag_for(server: &MockServer) -> ConfigBag {
    ConfigBag::new()
        .with(keys::USER_ID, TEST_USER_ID)
        .with(keys::ACCESS_TOKEN, TEST_ACCESS_TOKEN)
        .with(keys::HOST, server.address().ip().to_string())
        .with(keys::PORT, server.address().port().to_string())
        .with(keys::PATH, "api")
        .with(keys::PROTOCOL, "http")
        .with(keys::VERSION, "v1")
        .with(keys::TIMEOUT, "5")
}

/// Client for `bag` with optional in-process caches.
pub fn client_for(bag: &ConfigBag, context: ApplicationContext, caches: Option<CacheProviders>) -> NapiClient {
    let config = ClientConfig::from_bag(bag, context).expect("test config should be valid");
    NapiClient::with_cache_providers(config, caches).expect("test client should build")
}

/// Collection body with the given item ids and page count.
pub fn page_body(ids: &[u32], total_pages: u32) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "id": id, "type": "event" }))
        .collect();
    json!({
        "data": data,
        "meta": { "pagination": { "total_pages": total_pages } }
    })
}

pub fn ids(items: &[Value]) -> Vec<u64> {
    items
        .iter()
        .map(|item| item["id"].as_u64().expect("item should have a numeric id"))
        .collect()
}
