use crate::helpers::{EVENTS_PATH, bag_for, client_for, page_body};

use napi_core::config::{ApplicationContext, keys};
use napi_core::napi_client::request_logger::REQUEST_LOGGER_TARGET;
use napi_core::{FetchOptions, fetch_all};

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies development clients write one request and one response line per page.
///
/// **WHY THIS MATTERS**: The request log is the only way to see which NAPI calls a CMS
/// page triggered. It must be written to the configured file and must not depend on
/// whether a global logger was installed.
///
/// **BUG THIS CATCHES**: Would catch the fern dispatch being applied globally (which
/// fails when another logger exists) or records being filtered out by level.
#[tokio::test]
async fn given_development_client_when_fetching_then_requests_are_logged_to_file() {
    // GIVEN: A development client with a log file and a two-page collection
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], 2)))
        .expect(2)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("requests.log");
    let bag = bag_for(&server).with(keys::LOG_FILE, log_path.to_string_lossy());
    let client = client_for(&bag, ApplicationContext::Development, None);
    let repository = client.repository::<Value>("event").unwrap();
    let mut query = repository.query();

    // WHEN: Fetching both pages
    fetch_all(&repository, &mut query, &FetchOptions::default())
        .await
        .unwrap();

    // THEN: The file holds a GET and an HTTP 200 line for each page
    let contents = std::fs::read_to_string(&log_path).unwrap();
    let requests = contents.lines().filter(|line| line.contains("] GET ")).count();
    let responses = contents.lines().filter(|line| line.contains("HTTP 200")).count();
    assert_eq!(requests, 2, "log was:\n{contents}");
    assert_eq!(responses, 2, "log was:\n{contents}");
    assert!(contents.contains("page%5Bnumber%5D=2"));
    assert_eq!(REQUEST_LOGGER_TARGET, "NdkRequestLogger");
}

#[tokio::test]
async fn given_production_client_when_fetching_then_no_log_file_is_created() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], 1)))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("requests.log");
    let bag = bag_for(&server).with(keys::LOG_FILE, log_path.to_string_lossy());
    let client = client_for(&bag, ApplicationContext::Production, None);
    let repository = client.repository::<Value>("event").unwrap();
    let mut query = repository.query();

    fetch_all(&repository, &mut query, &FetchOptions::default())
        .await
        .unwrap();

    assert!(!log_path.exists());
}

/// **VALUE**: Verifies the log level of a response line follows its status class.
///
/// **WHY THIS MATTERS**: Refused credentials need attention from whoever configured
/// the site, while an unknown resource is usually a caller mistake. Grepping the
/// request log for ERROR should find the first and not the second.
#[tokio::test]
async fn given_refused_and_missing_responses_when_logged_then_levels_differ() {
    // GIVEN: A development client whose first request is refused and second is not found
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("requests.log");
    let bag = bag_for(&server).with(keys::LOG_FILE, log_path.to_string_lossy());
    let client = client_for(&bag, ApplicationContext::Development, None);
    let repository = client.repository::<Value>("event").unwrap();

    // WHEN: Fetching twice
    let refused = fetch_all(&repository, &mut repository.query(), &FetchOptions::default()).await;
    let missing = fetch_all(&repository, &mut repository.query(), &FetchOptions::default()).await;

    // THEN: Both fail, the 401 is logged as an error and the 404 as a warning
    assert!(refused.is_err());
    assert!(missing.is_err());
    let contents = std::fs::read_to_string(&log_path).unwrap();
    let line_for = |status: &str| {
        contents
            .lines()
            .find(|line| line.contains(&format!("HTTP {status}")))
            .unwrap_or_else(|| panic!("no HTTP {status} line in:\n{contents}"))
            .to_string()
    };
    assert!(line_for("401").contains("ERROR]"));
    assert!(line_for("404").contains("WARN]"));
}
