//! Serde helpers for monday.com's loosely typed scalars.
//!
//! IDs are declared `ID!` in the schema and arrive as JSON strings, but
//! older endpoints and webhooks send plain numbers. Both are accepted.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Num(u64),
    Str(String),
}

/// Deserializes an optional ID from a string or a number.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdRepr::Num(n)) => Ok(Some(n)),
        Some(IdRepr::Str(s)) if s.is_empty() => Ok(None),
        Some(IdRepr::Str(s)) => s
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid id '{s}'"))),
    }
}

/// Decodes a JSON value that monday.com delivers as a JSON-encoded string,
/// such as `ColumnValue.value`. Non-JSON strings are kept as strings.
pub fn json_string<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            Some(serde_json::Value::String(s)) => Some(
                serde_json::from_str(&s).unwrap_or(serde_json::Value::String(s)),
            ),
            other => other,
        },
    )
}
