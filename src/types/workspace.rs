use serde::{Deserialize, Serialize};

use super::de;

/// A workspace grouping boards.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Workspace {
    /// The unique identifier of the workspace.
    #[serde(default, deserialize_with = "de::optional_id")]
    pub id: Option<u64>,
    /// The workspace's name.
    pub name: Option<String>,
    /// `open` or `closed`.
    pub kind: Option<String>,
    /// The workspace's description.
    pub description: Option<String>,
    /// `active`, `archived` or `deleted`.
    pub state: Option<String>,
}
