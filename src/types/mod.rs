//! Typed records decoded from monday.com responses.
//!
//! Every field is optional so a record decodes from whatever field
//! selection the caller asked for. Records are plain snapshots with no
//! identity beyond their values.
//!
//! # Example
//!
//! ```rust
//! use monday_api::types::Item;
//! use serde_json::json;
//!
//! let item: Item = serde_json::from_value(json!({
//!     "id": "9001",
//!     "name": "Write launch post",
//!     "column_values": [{"id": "status", "text": "Done", "value": "{\"index\":1}"}]
//! }))
//! .unwrap();
//!
//! assert_eq!(item.id, Some(9001));
//! assert_eq!(item.column_text("status"), Some("Done"));
//! ```

mod board;
mod column;
pub(crate) mod de;
mod group;
mod item;
mod user;
mod workspace;

pub use board::Board;
pub use column::{Column, ColumnValue};
pub use group::Group;
pub use item::{Item, ItemsPage};
pub use user::User;
pub use workspace::Workspace;
