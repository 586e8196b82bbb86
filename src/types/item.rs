use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::{Board, ColumnValue, Group};

/// A monday.com item (a row on a board).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Item {
    /// The unique identifier of the item.
    #[serde(default, deserialize_with = "de::optional_id")]
    pub id: Option<u64>,

    /// The item's name.
    pub name: Option<String>,

    /// `active`, `archived` or `deleted`.
    pub state: Option<String>,

    /// When the item was created.
    pub created_at: Option<DateTime<Utc>>,

    /// When the item was last updated.
    pub updated_at: Option<DateTime<Utc>>,

    /// The user who created the item.
    #[serde(default, deserialize_with = "de::optional_id")]
    pub creator_id: Option<u64>,

    /// The item's email address.
    pub email: Option<String>,

    /// The item's URL.
    pub url: Option<String>,

    /// The group containing the item.
    pub group: Option<Group>,

    /// The board containing the item.
    pub board: Option<Box<Board>>,

    /// The item's column values.
    pub column_values: Option<Vec<ColumnValue>>,

    /// The item's subitems.
    pub subitems: Option<Vec<Item>>,

    /// The parent of a subitem.
    pub parent_item: Option<Box<Item>>,
}

impl Item {
    /// Returns the column value with the given column id, if selected.
    #[must_use]
    pub fn column_value(&self, column_id: &str) -> Option<&ColumnValue> {
        self.column_values
            .as_ref()?
            .iter()
            .find(|value| value.id.as_deref() == Some(column_id))
    }

    /// Returns the display text of a column, if selected and non-empty.
    #[must_use]
    pub fn column_text(&self, column_id: &str) -> Option<&str> {
        self.column_value(column_id)?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

/// One page of items with the cursor for the next page.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ItemsPage {
    /// Cursor for the next page; `None` when exhausted.
    pub cursor: Option<String>,

    /// Items on this page.
    #[serde(default)]
    pub items: Vec<Item>,
}
