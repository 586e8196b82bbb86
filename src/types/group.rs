use serde::{Deserialize, Serialize};

use super::ItemsPage;

/// A group of items on a board.
///
/// Group ids are board-scoped strings such as `topics` or `new_group29179`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Group {
    /// The group's id.
    pub id: Option<String>,
    /// The group's title.
    pub title: Option<String>,
    /// The group's color as a hex string.
    pub color: Option<String>,
    /// The group's position on the board.
    pub position: Option<String>,
    /// Whether the group is archived.
    pub archived: Option<bool>,
    /// Whether the group is deleted.
    pub deleted: Option<bool>,
    /// One page of the group's items.
    pub items_page: Option<ItemsPage>,
}
