//! GraphQL query construction for monday.com operations.
//!
//! # Overview
//!
//! - [`OperationKind`]: Whether an operation reads (`query`) or writes (`mutation`)
//! - [`Fields`]: A whitespace-normalized field selection
//! - [`Arg`]: A GraphQL argument value
//! - [`build_graphql_query`]: Renders an operation into a query string
//! - [`QueryParams`] and [`ColumnFilter`]: Typed filters for item lookups
//!
//! # Example
//!
//! ```rust
//! use monday_api::query::{build_graphql_query, Arg, Fields, OperationKind};
//!
//! let query = build_graphql_query(
//!     "boards",
//!     OperationKind::Query,
//!     &[("ids", Some(Arg::from(vec![123_u64]))), ("limit", None)],
//!     &Fields::new("id   name"),
//! );
//! assert_eq!(query, "query { boards (ids: [123]) { id name } }");
//! ```

mod args;
mod params;

pub use args::Arg;
pub use params::{ColumnFilter, OrderBy, QueryParams, QueryRule, RulesOperator};

use std::fmt;

/// The GraphQL operation type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// A read-only operation.
    #[default]
    Query,
    /// A data-changing operation, counted against the mutation limit.
    Mutation,
}

impl OperationKind {
    /// Infers the kind from the leading keyword of a query string.
    ///
    /// Anything that does not start with `mutation` is treated as a query,
    /// including the anonymous `{ ... }` shorthand.
    #[must_use]
    pub fn infer(query: &str) -> Self {
        if query.trim_start().starts_with("mutation") {
            Self::Mutation
        } else {
            Self::Query
        }
    }

    /// Returns the GraphQL keyword for this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A GraphQL field selection.
///
/// Whitespace is collapsed on construction so selections copied from
/// multi-line strings render compactly.
///
/// # Example
///
/// ```rust
/// use monday_api::query::Fields;
///
/// let fields = Fields::new("id\n    name  column_values { id text }");
/// assert_eq!(fields.as_str(), "id name column_values { id text }");
/// assert!(fields.contains("column_values"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fields(String);

impl Fields {
    /// Creates a normalized field selection.
    #[must_use]
    pub fn new(fields: impl AsRef<str>) -> Self {
        Self(fields.as_ref().split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// Returns the normalized selection.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for an empty selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `name` appears as a whole field name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0
            .split(|c: char| c.is_whitespace() || matches!(c, '{' | '}' | '(' | ')' | ':' | ','))
            .any(|token| token == name)
    }

    /// Appends `extra` to this selection unless it is already present.
    #[must_use]
    pub fn with(self, extra: &str) -> Self {
        if self.contains(extra) {
            self
        } else if self.is_empty() {
            Self::new(extra)
        } else {
            Self::new(format!("{} {extra}", self.0))
        }
    }
}

impl From<&str> for Fields {
    fn from(fields: &str) -> Self {
        Self::new(fields)
    }
}

impl From<String> for Fields {
    fn from(fields: String) -> Self {
        Self::new(fields)
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders a single-operation GraphQL document.
///
/// Arguments whose value is `None` are omitted. An empty field selection
/// renders the operation without braces, for scalar-returning mutations such
/// as `update_board`.
#[must_use]
pub fn build_graphql_query(
    operation: &str,
    kind: OperationKind,
    args: &[(&str, Option<Arg>)],
    fields: &Fields,
) -> String {
    let selection = render_selection(operation, args, fields);
    format!("{kind} {{ {selection} }}")
}

/// Renders `operation(args) { fields }` without the enclosing document.
///
/// Used to nest one selection inside another, such as `items_page` inside
/// `boards`.
#[must_use]
pub fn render_selection(operation: &str, args: &[(&str, Option<Arg>)], fields: &Fields) -> String {
    let rendered: Vec<String> = args
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| format!("{name}: {v}")))
        .collect();

    let mut out = operation.to_string();
    if !rendered.is_empty() {
        out.push_str(" (");
        out.push_str(&rendered.join(", "));
        out.push(')');
    }
    if !fields.is_empty() {
        out.push_str(" { ");
        out.push_str(fields.as_str());
        out.push_str(" }");
    }
    out
}
