//! Cursor pagination for monday.com item pages.
//!
//! monday.com returns items in pages shaped `{ cursor, items }`. The first
//! page comes from `items_page` (nested under `boards`) or
//! `items_page_by_column_values`. Every later page comes from
//! `next_items_page` with the previous cursor. A null cursor means the walk
//! is done.
//!
//! [`Paginator::collect`] drives that walk through the retry engine. The
//! walk is all-or-nothing: if any page fails after its retries, the items
//! gathered so far are dropped and a [`PaginationError`] is returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use monday_api::clients::pagination::{board_items_pages, Paginator};
//! use monday_api::query::Fields;
//! use monday_api::types::Item;
//!
//! let items: Vec<Item> = Paginator::new(100)
//!     .with_item_limit(250)
//!     .collect(&client, board_items_pages(123, None, Fields::new("id name")))
//!     .await?;
//! ```

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::errors::{MondayError, PaginationError};
use crate::clients::graphql::MondayClient;
use crate::clients::http_request::GraphqlRequest;
use crate::query::{build_graphql_query, render_selection, Arg, ColumnFilter, Fields, OperationKind, QueryParams};

/// What the page builder is asked to fetch next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// `None` for the first page, otherwise the cursor from the previous page.
    pub cursor: Option<String>,
    /// Items to request on this page.
    pub limit: u32,
}

/// A `{cursor, items}` object located in a response.
#[derive(Debug, PartialEq)]
pub struct PageRef<'a> {
    /// The cursor for the next page; `None` when exhausted.
    pub cursor: Option<String>,
    /// The raw items of this page.
    pub items: &'a [Value],
}

/// Finds the first `{cursor, items}` object in a `data` payload.
///
/// An empty-string cursor is treated the same as `null`.
#[must_use]
pub fn extract_page(data: &Value) -> Option<PageRef<'_>> {
    match data {
        Value::Object(map) => {
            if let (Some(cursor), Some(Value::Array(items))) = (map.get("cursor"), map.get("items")) {
                let cursor = cursor.as_str().filter(|c| !c.is_empty()).map(String::from);
                return Some(PageRef { cursor, items });
            }
            map.values().find_map(extract_page)
        }
        Value::Array(values) => values.iter().find_map(extract_page),
        _ => None,
    }
}

/// Drives a cursor walk with an optional item limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paginator {
    page_size: u32,
    item_limit: Option<usize>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// Items requested per page unless configured otherwise.
    pub const DEFAULT_PAGE_SIZE: u32 = 25;

    /// monday.com rejects item pages larger than this.
    pub const MAX_PAGE_SIZE: u32 = 500;

    /// Creates a paginator. `page_size` is clamped to `1..=500`.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.clamp(1, Self::MAX_PAGE_SIZE),
            item_limit: None,
        }
    }

    /// Stops the walk once `limit` items have been collected.
    #[must_use]
    pub const fn with_item_limit(mut self, limit: usize) -> Self {
        self.item_limit = Some(limit);
        self
    }

    /// Sets or clears the item limit.
    #[must_use]
    pub const fn with_optional_limit(mut self, limit: Option<usize>) -> Self {
        self.item_limit = limit;
        self
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the item limit, if any.
    #[must_use]
    pub const fn item_limit(&self) -> Option<usize> {
        self.item_limit
    }

    fn next_limit(&self, collected: usize) -> u32 {
        match self.item_limit {
            Some(limit) => {
                let remaining = limit.saturating_sub(collected);
                u32::try_from(remaining).map_or(self.page_size, |r| r.min(self.page_size))
            }
            None => self.page_size,
        }
    }

    /// Walks every page and returns the concatenated items in page order.
    ///
    /// `build` turns each [`PageRequest`] into the GraphQL request for that
    /// page. Pages are fetched strictly one after another. An item whose
    /// `id` was already returned earlier in the walk is skipped; items
    /// without an `id` are always kept.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::Pagination`] if a page fails after retries,
    /// a response holds no `{cursor, items}` object, items fail to decode,
    /// or the server returns a cursor it already returned in this walk.
    pub async fn collect<T, B>(&self, client: &MondayClient, mut build: B) -> Result<Vec<T>, MondayError>
    where
        T: DeserializeOwned,
        B: FnMut(PageRequest) -> GraphqlRequest,
    {
        if self.item_limit == Some(0) {
            return Ok(Vec::new());
        }

        let mut items: Vec<T> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen: HashSet<String> = HashSet::new();
        let mut emitted: HashSet<String> = HashSet::new();
        let mut pages: u32 = 0;

        loop {
            let request = build(PageRequest {
                cursor: cursor.clone(),
                limit: self.next_limit(items.len()),
            });

            let data = client
                .execute(&request)
                .await
                .map_err(PaginationError::from_source)?;
            pages += 1;

            let Some(page) = extract_page(&data) else {
                tracing::error!(page = pages, "Response contained no items page");
                return Err(PaginationError::new("response contained no items page").into());
            };

            for raw in page.items {
                if let Some(key) = item_key(raw) {
                    if !emitted.insert(key) {
                        continue;
                    }
                }
                let item = T::deserialize(raw).map_err(|e| {
                    PaginationError::from_source(MondayError::decode("items page", e))
                })?;
                items.push(item);
            }

            if let Some(limit) = self.item_limit {
                if items.len() >= limit {
                    items.truncate(limit);
                    break;
                }
            }

            match page.cursor {
                None => break,
                Some(next) => {
                    if !seen.insert(next.clone()) {
                        tracing::error!(cursor = %next, "Cursor repeated during pagination");
                        return Err(PaginationError::new(format!(
                            "cursor '{next}' was returned more than once"
                        ))
                        .into());
                    }
                    cursor = Some(next);
                }
            }
        }

        tracing::debug!(pages, items = items.len(), "Pagination complete");
        Ok(items)
    }
}

/// The item's `id` as text, whether the server sent it as a string or a number.
fn item_key(raw: &Value) -> Option<String> {
    match raw.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn page_fields(item_fields: &Fields) -> Fields {
    Fields::new(format!("cursor items {{ {item_fields} }}"))
}

/// Builds a `next_items_page` request for a follow-up page.
#[must_use]
pub fn next_items_page(cursor: &str, limit: u32, item_fields: &Fields) -> GraphqlRequest {
    GraphqlRequest::query(build_graphql_query(
        "next_items_page",
        OperationKind::Query,
        &[("limit", Some(Arg::from(limit))), ("cursor", Some(Arg::from(cursor)))],
        &page_fields(item_fields),
    ))
}

/// Builds the first `items_page` request for a board.
#[must_use]
pub fn items_page(
    board_id: u64,
    limit: u32,
    query_params: Option<&QueryParams>,
    item_fields: &Fields,
) -> GraphqlRequest {
    let inner = render_selection(
        "items_page",
        &[
            ("limit", Some(Arg::from(limit))),
            ("query_params", query_params.map(QueryParams::to_arg)),
        ],
        &page_fields(item_fields),
    );
    GraphqlRequest::query(build_graphql_query(
        "boards",
        OperationKind::Query,
        &[("ids", Some(Arg::List(vec![Arg::from(board_id)])))],
        &Fields::new(inner),
    ))
}

/// Builds the first `items_page_by_column_values` request for a board.
#[must_use]
pub fn items_page_by_column_values(
    board_id: u64,
    limit: u32,
    columns: &[ColumnFilter],
    item_fields: &Fields,
) -> GraphqlRequest {
    GraphqlRequest::query(build_graphql_query(
        "items_page_by_column_values",
        OperationKind::Query,
        &[
            ("board_id", Some(Arg::from(board_id))),
            ("limit", Some(Arg::from(limit))),
            (
                "columns",
                Some(Arg::List(columns.iter().map(ColumnFilter::to_arg).collect())),
            ),
        ],
        &page_fields(item_fields),
    ))
}

/// Page builder for the items of one board.
pub fn board_items_pages(
    board_id: u64,
    query_params: Option<QueryParams>,
    item_fields: Fields,
) -> impl FnMut(PageRequest) -> GraphqlRequest {
    move |page| match page.cursor {
        None => items_page(board_id, page.limit, query_params.as_ref(), &item_fields),
        Some(cursor) => next_items_page(&cursor, page.limit, &item_fields),
    }
}

/// Page builder for items matching column values.
pub fn column_values_pages(
    board_id: u64,
    columns: Vec<ColumnFilter>,
    item_fields: Fields,
) -> impl FnMut(PageRequest) -> GraphqlRequest {
    move |page| match page.cursor {
        None => items_page_by_column_values(board_id, page.limit, &columns, &item_fields),
        Some(cursor) => next_items_page(&cursor, page.limit, &item_fields),
    }
}
