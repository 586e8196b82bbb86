//! GraphQL argument values.

use std::fmt;

use serde_json::Value;

/// A GraphQL argument value as it appears in a query document.
///
/// # Example
///
/// ```rust
/// use monday_api::query::Arg;
/// use serde_json::json;
///
/// assert_eq!(Arg::from("say \"hi\"").to_string(), r#""say \"hi\"""#);
/// assert_eq!(Arg::enum_value("public").to_string(), "public");
/// assert_eq!(
///     Arg::JsonString(json!({"status": {"label": "Done"}})).to_string(),
///     r#""{\"status\":{\"label\":\"Done\"}}""#
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// An integer literal.
    Int(i64),
    /// A quoted, escaped string literal.
    Str(String),
    /// `true` or `false`.
    Bool(bool),
    /// A bare enum value such as `public` or `duplicate_board_with_structure`.
    Enum(String),
    /// A list literal.
    List(Vec<Arg>),
    /// An input object literal, rendered in insertion order.
    Object(Vec<(String, Arg)>),
    /// A JSON payload passed as a string argument (`column_values`,
    /// `columns_mapping`). Serialized first, then quoted.
    JsonString(Value),
    /// The `null` literal.
    Null,
}

impl Arg {
    /// Creates a bare enum value.
    #[must_use]
    pub fn enum_value(value: impl Into<String>) -> Self {
        Self::Enum(value.into())
    }

    /// Creates an input object from key/value pairs.
    #[must_use]
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wraps an optional value, dropping it when `None`.
    pub fn opt<T: Into<Self>>(value: Option<T>) -> Option<Self> {
        value.map(Into::into)
    }

    /// Returns `None` for an empty list so the argument is omitted.
    pub fn non_empty<T: Clone + Into<Self>>(values: &[T]) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self::List(values.iter().cloned().map(Into::into).collect()))
        }
    }
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(&quote(s)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Enum(e) => f.write_str(e),
            Self::List(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Self::Object(fields) => {
                f.write_str("{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::JsonString(value) => f.write_str(&quote(&value.to_string())),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u32> for Arg {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

// monday.com IDs are `ID!`, which also accepts a string literal.
impl From<u64> for Arg {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or_else(|_| Self::Str(n.to_string()), Self::Int)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl<T: Into<Self>> From<Vec<T>> for Arg {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_escaping() {
        assert_eq!(Arg::from("line\nbreak").to_string(), r#""line\nbreak""#);
        assert_eq!(Arg::from(r"back\slash").to_string(), r#""back\\slash""#);
    }

    #[test]
    fn test_nested_object_and_list() {
        let arg = Arg::object([
            (
                "rules",
                Arg::List(vec![Arg::object([
                    ("column_id", Arg::from("status")),
                    ("compare_value", Arg::from(vec!["Done"])),
                    ("operator", Arg::enum_value("any_of")),
                ])]),
            ),
            ("operator", Arg::enum_value("and")),
        ]);
        assert_eq!(
            arg.to_string(),
            r#"{rules: [{column_id: "status", compare_value: ["Done"], operator: any_of}], operator: and}"#
        );
    }

    #[test]
    fn test_json_string_is_double_encoded() {
        let arg = Arg::JsonString(json!({"text": "a \"quote\""}));
        assert_eq!(arg.to_string(), r#""{\"text\":\"a \\\"quote\\\"\"}""#);
    }

    #[test]
    fn test_large_ids_fall_back_to_strings() {
        assert_eq!(Arg::from(u64::MAX).to_string(), format!("\"{}\"", u64::MAX));
        assert_eq!(Arg::from(42_u64).to_string(), "42");
    }

    #[test]
    fn test_non_empty_omits_empty_lists() {
        assert_eq!(Arg::non_empty::<u64>(&[]), None);
        assert_eq!(
            Arg::non_empty(&[1_u64, 2]).map(|a| a.to_string()),
            Some("[1, 2]".to_string())
        );
    }
}
