//! Typed service facades over the GraphQL client.
//!
//! # Overview
//!
//! Each facade borrows a [`MondayClient`](crate::MondayClient), validates
//! its arguments, builds a query with
//! [`build_graphql_query`](crate::query::build_graphql_query), and decodes
//! the result into [`types`](crate::types). Retries and cursor walks are
//! delegated to the client and [`Paginator`](crate::clients::Paginator);
//! the facades hold no policy of their own.
//!
//! - [`Boards`]: Query, create, duplicate, update, archive, delete, item walks
//! - [`Items`]: Query, create, move, archive, delete, column updates, lookups
//! - [`Groups`]: Query, create, duplicate, archive, delete
//! - [`Users`]: Paged user lookup
//! - [`Subitems`]: Query and create subitems
//!
//! # Example
//!
//! ```rust,ignore
//! use monday_api::query::Fields;
//! use monday_api::services::BoardQuery;
//!
//! let boards = client
//!     .boards()
//!     .query(&BoardQuery::new().ids(vec![123, 456]), &Fields::new("id name"))
//!     .await?;
//! ```

mod boards;
mod groups;
mod items;
mod subitems;
mod users;

pub use boards::{
    BoardAttribute, BoardItems, BoardKind, BoardQuery, BoardState, Boards, BoardsOrderBy,
    CreateBoard, DuplicateBoard, DuplicateBoardType, ItemsQuery,
};
pub use groups::{BoardGroups, CreateGroup, DuplicateGroup, Groups};
pub use items::{CreateItem, ItemQuery, Items, MoveToBoard, PositionRelativeMethod};
pub use subitems::{CreateSubitem, ItemSubitems, Subitems};
pub use users::{UserKind, UserQuery, Users};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::MondayError;

/// Decodes `data[field]` into `T`.
pub(crate) fn decode_field<T: DeserializeOwned>(data: &Value, field: &str) -> Result<T, MondayError> {
    let value = data.get(field).cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| MondayError::decode(field, e))
}

/// Rejects an empty id list before any request is built.
pub(crate) fn require_ids<T>(ids: &[T], what: &str) -> Result<(), MondayError> {
    if ids.is_empty() {
        return Err(MondayError::InvalidInput(format!("at least one {what} is required")));
    }
    Ok(())
}

/// Rejects an empty or whitespace-only name.
pub(crate) fn require_name(value: &str, what: &str) -> Result<(), MondayError> {
    if value.trim().is_empty() {
        return Err(MondayError::InvalidInput(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// Detects a page-number walk answered with the same page twice in a row.
#[derive(Debug, Default)]
pub(crate) struct RepeatedPage {
    previous: Option<Vec<Option<u64>>>,
}

impl RepeatedPage {
    /// Records this page's ids and returns `true` if they equal the last page's.
    pub(crate) fn check(&mut self, ids: Vec<Option<u64>>) -> bool {
        if self.previous.as_ref() == Some(&ids) {
            return true;
        }
        self.previous = Some(ids);
        false
    }
}
