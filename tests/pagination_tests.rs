//! Integration tests for the cursor pagination walker.

mod common;

use std::time::Duration;

use common::{board_page, client, complexity, ok, page, server_error, ScriptedTransport};
use monday_api::clients::pagination::board_items_pages;
use monday_api::query::Fields;
use monday_api::types::Item;
use monday_api::{MondayError, Paginator};
use serde_json::json;
use tokio::time::Instant;
use tokio_test::{assert_err, assert_ok};

fn ids(items: &[Item]) -> Vec<u64> {
    items.iter().filter_map(|item| item.id).collect()
}

// ============================================================================
// Full Walk Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_walk_concatenates_pages_in_order() {
    let transport = ScriptedTransport::new([
        board_page(Some("c1"), 1, 10),
        page(Some("c2"), 11, 10),
        page(None, 21, 5),
    ]);
    let client = client(transport.clone(), 4);

    let items: Vec<Item> = assert_ok!(
        Paginator::new(10)
            .collect(&client, board_items_pages(42, None, Fields::new("id name")))
            .await
    );

    assert_eq!(items.len(), 25);
    assert_eq!(ids(&items), (1..=25).collect::<Vec<u64>>());
    assert_eq!(transport.sends(), 3);

    let queries = transport.queries();
    assert!(queries[0].starts_with("query { boards (ids: [42]) { items_page (limit: 10)"));
    assert!(queries[1].contains(r#"next_items_page (limit: 10, cursor: "c1")"#));
    assert!(queries[2].contains(r#"cursor: "c2""#));
}

#[tokio::test(start_paused = true)]
async fn test_empty_first_page_is_not_an_error() {
    let transport = ScriptedTransport::new([board_page(None, 1, 0)]);
    let client = client(transport.clone(), 4);

    let items: Vec<Item> = assert_ok!(
        Paginator::default()
            .collect(&client, board_items_pages(1, None, Fields::new("id")))
            .await
    );

    assert!(items.is_empty());
    assert_eq!(transport.sends(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_items_repeated_across_pages_are_emitted_once() {
    let transport = ScriptedTransport::new([
        board_page(Some("c1"), 1, 3),
        page(Some("c2"), 3, 3),
        page(None, 5, 2),
    ]);
    let client = client(transport.clone(), 4);

    let items: Vec<Item> = assert_ok!(
        Paginator::new(3)
            .collect(&client, board_items_pages(1, None, Fields::new("id")))
            .await
    );

    assert_eq!(ids(&items), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(transport.sends(), 3);
}

// ============================================================================
// Item Limit Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_item_limit_shrinks_last_page_request() {
    let transport = ScriptedTransport::new([
        board_page(Some("c1"), 1, 10),
        page(Some("c2"), 11, 5),
        page(None, 16, 10),
    ]);
    let client = client(transport.clone(), 4);

    let items: Vec<Item> = assert_ok!(
        Paginator::new(10)
            .with_item_limit(15)
            .collect(&client, board_items_pages(1, None, Fields::new("id")))
            .await
    );

    assert_eq!(items.len(), 15);
    assert_eq!(transport.sends(), 2);
    assert!(transport.queries()[1].contains("next_items_page (limit: 5,"));
}

#[tokio::test(start_paused = true)]
async fn test_item_limit_truncates_oversized_page() {
    // The server may ignore the requested limit.
    let transport = ScriptedTransport::new([board_page(Some("c1"), 1, 10)]);
    let client = client(transport.clone(), 4);

    let items: Vec<Item> = assert_ok!(
        Paginator::new(10)
            .with_item_limit(3)
            .collect(&client, board_items_pages(1, None, Fields::new("id")))
            .await
    );

    assert_eq!(ids(&items), vec![1, 2, 3]);
    assert_eq!(transport.sends(), 1);
    assert!(transport.queries()[0].contains("items_page (limit: 3)"));
}

#[tokio::test(start_paused = true)]
async fn test_zero_item_limit_sends_nothing() {
    let transport = ScriptedTransport::new([board_page(None, 1, 10)]);
    let client = client(transport.clone(), 4);

    let items: Vec<Item> = assert_ok!(
        Paginator::new(10)
            .with_item_limit(0)
            .collect(&client, board_items_pages(1, None, Fields::new("id")))
            .await
    );

    assert!(items.is_empty());
    assert_eq!(transport.sends(), 0);
}

// ============================================================================
// Failure Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_failing_page_discards_partial_items() {
    let transport = ScriptedTransport::new([
        board_page(Some("c1"), 1, 5),
        page(Some("c2"), 6, 5),
        server_error(),
    ]);
    let client = client(transport.clone(), 1);

    let error = assert_err!(
        Paginator::new(5)
            .collect::<Item, _>(&client, board_items_pages(1, None, Fields::new("id")))
            .await
    );

    match error {
        MondayError::Pagination(e) => {
            assert!(matches!(e.source.as_deref(), Some(MondayError::Api(_))));
        }
        other => panic!("expected Pagination error, got {other:?}"),
    }
    // two good pages, then the third page sent twice
    assert_eq!(transport.sends(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_limit_error_mid_walk_is_retried() {
    let transport = ScriptedTransport::new([
        board_page(Some("c1"), 1, 2),
        complexity(2),
        page(None, 3, 2),
    ]);
    let client = client(transport.clone(), 4);

    let start = Instant::now();
    let items: Vec<Item> = assert_ok!(
        Paginator::new(2)
            .collect(&client, board_items_pages(1, None, Fields::new("id")))
            .await
    );

    assert_eq!(items.len(), 4);
    assert_eq!(transport.sends(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn test_repeated_cursor_fails_walk() {
    let transport = ScriptedTransport::new([
        board_page(Some("c1"), 1, 2),
        page(Some("c1"), 3, 2),
        page(None, 5, 2),
    ]);
    let client = client(transport.clone(), 4);

    let error = assert_err!(
        Paginator::new(2)
            .collect::<Item, _>(&client, board_items_pages(1, None, Fields::new("id")))
            .await
    );

    match error {
        MondayError::Pagination(e) => {
            assert!(e.message.contains("c1"));
            assert!(e.source.is_none());
        }
        other => panic!("expected Pagination error, got {other:?}"),
    }
    assert_eq!(transport.sends(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_response_without_page_fails_walk() {
    let transport = ScriptedTransport::new([ok(json!({"boards": []}))]);
    let client = client(transport.clone(), 4);

    let error = assert_err!(
        Paginator::default()
            .collect::<Item, _>(&client, board_items_pages(1, None, Fields::new("id")))
            .await
    );

    assert!(matches!(error, MondayError::Pagination(_)));
}
