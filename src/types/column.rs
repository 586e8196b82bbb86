use serde::{Deserialize, Serialize};

use super::de;

/// A board column definition.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Column {
    /// The column's id, unique within its board.
    pub id: Option<String>,
    /// The column's title.
    pub title: Option<String>,
    /// The column type, such as `status`, `date` or `people`.
    #[serde(rename = "type")]
    pub column_type: Option<String>,
    /// The column's description.
    pub description: Option<String>,
    /// The column's settings as a JSON string.
    pub settings_str: Option<String>,
    /// Whether the column is archived.
    pub archived: Option<bool>,
}

/// An item's value in one column.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ColumnValue {
    /// The column's id.
    pub id: Option<String>,
    /// The value as display text.
    pub text: Option<String>,
    /// The column type.
    #[serde(rename = "type")]
    pub column_type: Option<String>,
    /// The raw value. monday.com sends it as a JSON-encoded string; it is
    /// decoded here.
    #[serde(default, deserialize_with = "de::json_string")]
    pub value: Option<serde_json::Value>,
}
