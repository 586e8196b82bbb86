//! HTTP-level tests for the reqwest transport and the client's wire format.

use std::collections::HashMap;
use std::time::Duration;

use monday_api::clients::with_headers;
use monday_api::{ApiKey, ApiUrl, ApiVersion, GraphqlRequest, MondayClient, MondayConfig, MondayError};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use monday_api::TransportError;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, max_retries: u32, timeout: Duration) -> MondayClient {
    let config = MondayConfig::builder()
        .api_key(ApiKey::new("test-token").unwrap())
        .base_url(ApiUrl::new(format!("{}/v2", server.uri())).unwrap())
        .api_version(ApiVersion::V2024_10)
        .max_retries(max_retries)
        .timeout(timeout)
        .build()
        .unwrap();
    MondayClient::new(config).unwrap()
}

// ============================================================================
// Request Format Tests
// ============================================================================

#[tokio::test]
async fn test_request_carries_auth_version_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2"))
        .and(header("Authorization", "test-token"))
        .and(header("API-Version", "2024-10"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "query": "query ($ids: [ID!]) { boards (ids: $ids) { id } }",
            "variables": {"ids": [1]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"boards": [{"id": "1"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 0, Duration::from_secs(5));
    let request = GraphqlRequest::query("query ($ids: [ID!]) { boards (ids: $ids) { id } }")
        .with_variables(json!({"ids": [1]}));

    let data = assert_ok!(client.execute(&request).await);
    assert_eq!(data, json!({"boards": [{"id": "1"}]}));
}

#[tokio::test]
async fn test_scoped_headers_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "other-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"me": {"id": "2"}}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 0, Duration::from_secs(5));
    let headers = HashMap::from([("authorization".to_string(), "other-token".to_string())]);

    let data = assert_ok!(with_headers(headers, client.post_request("query { me { id } }")).await);
    assert_eq!(data["me"]["id"], "2");
}

// ============================================================================
// Response Handling Tests
// ============================================================================

#[tokio::test]
async fn test_non_json_body_becomes_api_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(502)
                .insert_header("x-request-id", "req-123")
                .set_body_string("<html>Bad Gateway</html>"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 0, Duration::from_secs(5));
    let error = assert_err!(client.post_request("query { me { id } }").await);

    match error {
        MondayError::Api(e) => {
            assert_eq!(e.status, 502);
            assert_eq!(e.message, "<html>Bad Gateway</html>");
            assert_eq!(e.request_id.as_deref(), Some("req-123"));
            assert_eq!(e.payload, json!({"raw_body": "<html>Bad Gateway</html>"}));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_429_uses_retry_after_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "3"))
        .mount(&server)
        .await;

    let client = client_for(&server, 0, Duration::from_secs(5));
    let error = assert_err!(client.post_request("mutation { archive_item (item_id: 1) { id } }").await);

    assert!(matches!(error, MondayError::MutationLimitExceeded(_)));
    assert_eq!(error.reset_in(), Some(Duration::from_secs(3)));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(json!({"data": {}})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 0, Duration::from_millis(200));
    let error = assert_err!(client.post_request("query { me { id } }").await);

    assert!(matches!(error, MondayError::Transport(_)));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_server_error_is_retried_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error_message": "Internal server error",
            "status_code": 500
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"me": {"id": "1"}}})))
        .expect(1)
        .mount(&server)
        .await;

    let config = MondayConfig::builder()
        .api_key(ApiKey::new("test-token").unwrap())
        .base_url(ApiUrl::new(format!("{}/v2", server.uri())).unwrap())
        .base_backoff(Duration::from_millis(10))
        .build()
        .unwrap();
    let client = MondayClient::new(config).unwrap();

    let data = assert_ok!(client.post_request("query { me { id } }").await);
    assert_eq!(data["me"]["id"], "1");
}

#[tokio::test]
async fn test_unbuildable_request_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let config = MondayConfig::builder()
        .api_key(ApiKey::new("test-token").unwrap())
        .base_url(ApiUrl::new(format!("{}/v2", server.uri())).unwrap())
        .max_retries(3)
        .base_backoff(Duration::from_millis(100))
        .build()
        .unwrap();
    let client = MondayClient::new(config).unwrap();
    let request = GraphqlRequest::query("query { me { id } }").with_header("Bad Header", "x");

    let start = std::time::Instant::now();
    let error = assert_err!(client.execute(&request).await);

    assert!(matches!(
        error,
        MondayError::Transport(TransportError::InvalidRequest(_))
    ));
    assert!(!error.is_retryable());
    assert!(start.elapsed() < Duration::from_millis(100));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
