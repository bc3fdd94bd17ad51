use crate::helpers::{
    EVENTS_PATH, TEST_ACCESS_TOKEN, TEST_USER_ID, bag_for, client_for, ids, page_body,
};

use napi_core::cache::CacheProviders;
use napi_core::config::{ApplicationContext, keys};
use napi_core::{FetchOptions, Repository, fetch_all, fetch_all_or_empty};

use serde::Deserialize;
use serde_json::{Value, json};
use wiremock::matchers::{
    basic_auth, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: End-to-end check of the accumulator against a real HTTP round trip.
///
/// **WHY THIS MATTERS**: Unit tests use a scripted repository. This proves the page
/// number and size actually reach the wire and the reported page count is read back
/// from the response body.
///
/// **BUG THIS CATCHES**: Would catch query parameters being misspelled or the
/// `meta.pagination.total_pages` path not being parsed.
#[tokio::test]
async fn given_three_pages_on_server_when_fetching_all_then_requests_each_page_once() {
    // GIVEN: A server with three pages of two events
    let server = MockServer::start().await;
    for (page, page_ids) in [(1, [1, 2]), (2, [3, 4]), (3, [5, 6])] {
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .and(query_param("page[number]", page.to_string()))
            .and(query_param("page[size]", "2"))
            .and(header("x-user-id", TEST_USER_ID))
            .and(header("x-access-token", TEST_ACCESS_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&page_ids, 3)))
            .expect(1)
            .mount(&server)
            .await;
    }
    let client = client_for(&bag_for(&server), ApplicationContext::Production, None);
    let repository = client.repository::<Value>("event").unwrap();
    let mut query = repository.query();

    // WHEN: Fetching everything with page size 2
    let items = fetch_all(&repository, &mut query, &FetchOptions::new().with_page_size(2))
        .await
        .unwrap();

    // THEN: All six events in order (expectations verified when the server drops)
    assert_eq!(ids(&items), vec![1, 2, 3, 4, 5, 6]);
}

/// **VALUE**: Verifies a client configured with timeout 0 still receives responses.
///
/// **BUG THIS CATCHES**: Would catch 0 becoming a zero-length deadline that drops
/// every answer from the server.
#[tokio::test]
async fn given_zero_timeout_when_fetching_then_server_response_is_returned() {
    // GIVEN: A server with one page and a client configured with timeout 0
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[7], 1)))
        .expect(1)
        .mount(&server)
        .await;
    let bag = bag_for(&server).with(keys::TIMEOUT, "0");
    let client = client_for(&bag, ApplicationContext::Production, None);
    let repository = client.repository::<Value>("event").unwrap();
    let mut query = repository.query();

    // WHEN: Fetching everything
    let items = fetch_all(&repository, &mut query, &FetchOptions::default())
        .await
        .unwrap();

    // THEN: The page arrives and no timeout is set
    assert_eq!(client.timeout(), None);
    assert_eq!(ids(&items), vec![7]);
}

#[tokio::test]
async fn given_includes_when_fetching_then_include_parameter_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("include", "region,address"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], 1)))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&bag_for(&server), ApplicationContext::Production, None);
    let repository = client.repository::<Value>("event").unwrap();
    let mut query = repository.query();

    let options = FetchOptions::new().with_includes(["region", "address"]);
    let items = fetch_all(&repository, &mut query, &options).await.unwrap();

    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn given_no_includes_when_fetching_then_include_parameter_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param_is_missing("include"))
        .and(query_param("page[size]", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 1)))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&bag_for(&server), ApplicationContext::Production, None);
    let repository = client.repository::<Value>("event").unwrap();
    let mut query = repository.query();

    let items = fetch_all(&repository, &mut query, &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(ids(&items), vec![1, 2]);
}

/// **VALUE**: Verifies server errors keep their status code and the silent policy hides them.
///
/// **WHY THIS MATTERS**: `fetch_all` callers decide on retries from the status code;
/// `fetch_all_or_empty` callers must still get an empty list, not a panic.
#[tokio::test]
async fn given_server_error_when_fetching_then_status_is_reported_or_hidden() {
    // GIVEN: A server that always answers 503
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    let client = client_for(&bag_for(&server), ApplicationContext::Production, None);
    let repository = client.repository::<Value>("event").unwrap();

    // WHEN: Fetching with the explicit policy
    let mut query = repository.query();
    let err = fetch_all(&repository, &mut query, &FetchOptions::default())
        .await
        .unwrap_err();

    // THEN: Page 1 failed with HTTP 503
    assert_eq!(err.failed_page(), 1);
    let napi_core::FetchError::Page { source, .. } = &err;
    assert_eq!(source.status().map(|status| status.0), Some(503));

    // AND: The silent policy returns nothing
    let mut query = repository.query();
    let items = fetch_all_or_empty(&repository, &mut query, &FetchOptions::default()).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn given_basic_auth_configured_when_fetching_then_credentials_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/institutions"))
        .and(basic_auth("editor", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[9], 1)))
        .expect(1)
        .mount(&server)
        .await;
    let bag = bag_for(&server)
        .with(keys::HTTP_AUTH_USERNAME, "editor")
        .with(keys::HTTP_AUTH_PASSWORD, "secret");
    let client = client_for(&bag, ApplicationContext::Production, None);
    let repository = client.repository::<Value>("institution").unwrap();

    let page = repository.get(&repository.query()).await.unwrap();

    assert_eq!(ids(page.items()), vec![9]);
}

/// **VALUE**: Verifies items can be deserialized into caller-defined types.
#[tokio::test]
async fn given_typed_repository_when_fetching_then_items_are_deserialized() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Person {
        id: u32,
        name: String,
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/people"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 1, "name": "Anna" }, { "id": 2, "name": "Ben" }],
            "meta": { "pagination": { "total_pages": 1 } }
        })))
        .mount(&server)
        .await;
    let client = client_for(&bag_for(&server), ApplicationContext::Production, None);
    let repository = client.repository::<Person>("person").unwrap();
    let mut query = repository.query();

    let people = fetch_all(&repository, &mut query, &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(
        people,
        vec![
            Person { id: 1, name: "Anna".to_string() },
            Person { id: 2, name: "Ben".to_string() },
        ]
    );
}

#[tokio::test]
async fn given_response_without_meta_when_fetching_then_page_count_is_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&bag_for(&server), ApplicationContext::Production, None);
    let repository = client.repository::<Value>("event").unwrap();

    let page = repository.get(&repository.query()).await.unwrap();

    assert_eq!(page.page_count(), 0);
    assert!(page.is_empty());
}

/// **VALUE**: Verifies the transport cache answers repeated identical requests.
///
/// **WHY THIS MATTERS**: The cache backend exists to spare the content API; if cached
/// bodies are never read, every page view still hits the remote service.
#[tokio::test]
async fn given_transport_cache_when_same_page_requested_twice_then_server_is_hit_once() {
    // GIVEN: A server that must only be asked once, and in-memory caches
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 1)))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(
        &bag_for(&server),
        ApplicationContext::Production,
        Some(CacheProviders::in_memory(16)),
    );
    let repository = client.repository::<Value>("event").unwrap();

    // WHEN: Requesting the same page twice
    let first = repository.get(&repository.query()).await.unwrap();
    let second = repository.get(&repository.query()).await.unwrap();

    // THEN: Identical results, one request
    assert_eq!(first, second);
    assert_eq!(ids(second.items()), vec![1, 2]);
}
