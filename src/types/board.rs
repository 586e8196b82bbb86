use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::{Column, Group, ItemsPage, User, Workspace};

/// A monday.com board.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Board {
    /// The unique identifier of the board.
    #[serde(default, deserialize_with = "de::optional_id")]
    pub id: Option<u64>,

    /// The board's name.
    pub name: Option<String>,

    /// The board's description.
    pub description: Option<String>,

    /// `active`, `archived` or `deleted`.
    pub state: Option<String>,

    /// `public`, `private` or `share`.
    pub board_kind: Option<String>,

    /// The folder containing the board.
    #[serde(default, deserialize_with = "de::optional_id")]
    pub board_folder_id: Option<u64>,

    /// The workspace containing the board; `None` for the main workspace.
    #[serde(default, deserialize_with = "de::optional_id")]
    pub workspace_id: Option<u64>,

    /// The workspace object, when selected.
    pub workspace: Option<Workspace>,

    /// The board's permission level.
    pub permissions: Option<String>,

    /// What items are called on this board.
    pub item_terminology: Option<String>,

    /// Number of items on the board.
    pub items_count: Option<u64>,

    /// The board's URL.
    pub url: Option<String>,

    /// When the board was last updated.
    pub updated_at: Option<DateTime<Utc>>,

    /// The board's columns.
    pub columns: Option<Vec<Column>>,

    /// The board's groups.
    pub groups: Option<Vec<Group>>,

    /// The group at the top of the board.
    pub top_group: Option<Group>,

    /// One page of the board's items.
    pub items_page: Option<ItemsPage>,

    /// The board's owners.
    pub owners: Option<Vec<User>>,

    /// The board's subscribers.
    pub subscribers: Option<Vec<User>>,
}

impl Board {
    /// Returns the column with the given id, if it was selected.
    #[must_use]
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns
            .as_ref()?
            .iter()
            .find(|column| column.id.as_deref() == Some(column_id))
    }
}
