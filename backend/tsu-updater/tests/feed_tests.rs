//! Integration tests for the version feed client using wiremock mock server

use std::time::Duration;

use serde_json::json;
use tsu_core::{CoreError, FeedSource};
use tsu_updater::HttpFeed;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const FEED_PATH: &str = "/tools/ts3versions.json";

fn feed_for(server: &MockServer, timeout: Duration) -> HttpFeed {
    HttpFeed::new(&format!("{}{}", server.uri(), FEED_PATH), timeout).unwrap()
}

#[tokio::test]
async fn test_fetch_feed_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "checked": "2020-06-01 12:00:00",
            "latest": "3.12.1",
            "versions": ["3.11.0", "3.12.0", "3.12.1"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let feed = feed_for(&mock_server, Duration::from_secs(5))
        .fetch_feed()
        .await
        .unwrap();

    assert_eq!(feed.latest, "3.12.1");
    assert_eq!(feed.versions.len(), 3);
}

#[tokio::test]
async fn test_fetch_feed_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let result = feed_for(&mock_server, Duration::from_secs(5))
        .fetch_feed()
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, CoreError::Feed { .. }));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_fetch_feed_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let result = feed_for(&mock_server, Duration::from_secs(5))
        .fetch_feed()
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, CoreError::Feed { .. }));
    assert!(err.to_string().contains("malformed"));
}

#[tokio::test]
async fn test_fetch_feed_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"latest": "3.12.1"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let result = feed_for(&mock_server, Duration::from_millis(200))
        .fetch_feed()
        .await;

    assert!(matches!(result, Err(CoreError::Feed { .. })));
}
