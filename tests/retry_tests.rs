//! Integration tests for retry and backoff behavior.
//!
//! These run on paused Tokio time, so every sleep is simulated and the
//! elapsed time equals the sum of the waits the engine chose.

mod common;

use std::time::Duration;

use common::{client, complexity, mutation_limit, ok, parse_error, server_error, ScriptedTransport, Step};
use monday_api::MondayError;
use serde_json::json;
use tokio::time::Instant;
use tokio_test::{assert_err, assert_ok};

const QUERY: &str = "query { me { id } }";

// ============================================================================
// Success Path Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_first_attempt_success_sends_once_without_sleeping() {
    let transport = ScriptedTransport::new([ok(json!({"me": {"id": "1"}}))]);
    let client = client(transport.clone(), 4);

    let start = Instant::now();
    let data = assert_ok!(client.post_request(QUERY).await);

    assert_eq!(data, json!({"me": {"id": "1"}}));
    assert_eq!(transport.sends(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

// ============================================================================
// Limit Error Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_complexity_limit_waits_reset_then_succeeds() {
    // Three attempts: two complexity errors with reset_in=2, then success.
    let transport = ScriptedTransport::new([
        complexity(2),
        complexity(2),
        ok(json!({"me": {"id": "1"}})),
    ]);
    let client = client(transport.clone(), 2);

    let start = Instant::now();
    let data = assert_ok!(client.post_request(QUERY).await);

    assert_eq!(data["me"]["id"], "1");
    assert_eq!(transport.sends(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_mutation_limit_sleeps_sum_of_resets() {
    let transport = ScriptedTransport::new([
        mutation_limit(3),
        mutation_limit(5),
        ok(json!({"create_item": {"id": "9"}})),
    ]);
    let client = client(transport.clone(), 4);

    let start = Instant::now();
    assert_ok!(client.post_request("mutation { create_item (board_id: 1, item_name: \"x\") { id } }").await);

    assert_eq!(transport.sends(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(8));
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_limit_reports_last_reset_in() {
    let transport = ScriptedTransport::new([complexity(7)]);
    let client = client(transport.clone(), 2);

    let start = Instant::now();
    let error = assert_err!(client.post_request(QUERY).await);

    assert!(matches!(error, MondayError::ComplexityLimitExceeded(_)));
    assert_eq!(error.reset_in(), Some(Duration::from_secs(7)));
    assert_eq!(transport.sends(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(14));
}

#[tokio::test(start_paused = true)]
async fn test_zero_retries_sends_once() {
    let transport = ScriptedTransport::new([complexity(1)]);
    let client = client(transport.clone(), 0);

    let error = assert_err!(client.post_request(QUERY).await);

    assert!(matches!(error, MondayError::ComplexityLimitExceeded(_)));
    assert_eq!(transport.sends(), 1);
}

// ============================================================================
// Query Format Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_query_format_error_is_never_retried() {
    for max_retries in [0, 1, 10] {
        let transport = ScriptedTransport::new([parse_error(), ok(json!({}))]);
        let client = client(transport.clone(), max_retries);

        let start = Instant::now();
        let error = assert_err!(client.post_request("query { boards { id }").await);

        assert!(matches!(error, MondayError::QueryFormat(_)));
        assert_eq!(transport.sends(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}

// ============================================================================
// Generic Failure Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_server_errors_back_off_exponentially() {
    let transport = ScriptedTransport::new([server_error(), server_error(), ok(json!({"ok": true}))]);
    let client = client(transport.clone(), 4);

    let start = Instant::now();
    assert_ok!(client.post_request(QUERY).await);

    // base backoff 1s, then 2s
    assert_eq!(transport.sends(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_server_error_exhaustion_returns_api_error() {
    let transport = ScriptedTransport::new([server_error()]);
    let client = client(transport.clone(), 3);

    let error = assert_err!(client.post_request(QUERY).await);

    match error {
        MondayError::Api(e) => {
            assert_eq!(e.status, 500);
            assert_eq!(e.message, "Internal server error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(transport.sends(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_retried_within_budget() {
    let transport = ScriptedTransport::new([Step::Timeout, ok(json!({"me": {"id": "1"}}))]);
    let client = client(transport.clone(), 4);

    let start = Instant::now();
    assert_ok!(client.post_request(QUERY).await);

    assert_eq!(transport.sends(), 2);
    assert_eq!(start.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_persistent_timeout_surfaces_transport_error() {
    let transport = ScriptedTransport::new([Step::Timeout]);
    let client = client(transport.clone(), 1);

    let error = assert_err!(client.post_request(QUERY).await);

    assert!(matches!(error, MondayError::Transport(_)));
    assert_eq!(transport.sends(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_request_returns_without_backoff() {
    let transport = ScriptedTransport::new([Step::InvalidRequest, ok(json!({}))]);
    let client = client(transport.clone(), 3);

    let start = Instant::now();
    let error = assert_err!(client.post_request(QUERY).await);

    assert!(matches!(error, MondayError::Transport(_)));
    assert!(!error.is_retryable());
    assert_eq!(transport.sends(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

// ============================================================================
// Cancellation Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_dropping_call_mid_sleep_stops_retries() {
    let transport = ScriptedTransport::new([complexity(30), ok(json!({}))]);
    let client = client(transport.clone(), 4);

    let outcome = tokio::time::timeout(Duration::from_secs(5), client.post_request(QUERY)).await;

    assert!(outcome.is_err());
    assert_eq!(transport.sends(), 1);
}
