//! Request descriptors for the monday.com GraphQL endpoint.
//!
//! A [`GraphqlRequest`] is built once per logical call and borrowed
//! immutably by the retry engine, so every resend carries the same query,
//! variables and headers.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::query::OperationKind;

/// A GraphQL operation to send to monday.com.
///
/// # Example
///
/// ```rust
/// use monday_api::clients::GraphqlRequest;
/// use monday_api::query::OperationKind;
/// use serde_json::json;
///
/// let request = GraphqlRequest::new("mutation ($name: String!) { create_board (board_name: $name, board_kind: public) { id } }")
///     .with_variables(json!({ "name": "Roadmap" }))
///     .with_header("API-Version", "2024-10");
///
/// assert_eq!(request.kind, OperationKind::Mutation);
/// assert_eq!(request.to_body()["variables"]["name"], "Roadmap");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GraphqlRequest {
    /// The full GraphQL document.
    pub query: String,
    /// Whether this is a query or a mutation.
    pub kind: OperationKind,
    /// Variables for the document, if any.
    pub variables: Option<Value>,
    /// Per-call header overrides. These win over client defaults and any
    /// scoped overrides.
    pub headers: HashMap<String, String>,
}

impl GraphqlRequest {
    /// Creates a request, inferring the kind from the leading keyword.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let kind = OperationKind::infer(&query);
        Self::with_kind(query, kind)
    }

    /// Creates a read-only request.
    #[must_use]
    pub fn query(query: impl Into<String>) -> Self {
        Self::with_kind(query.into(), OperationKind::Query)
    }

    /// Creates a mutation request.
    #[must_use]
    pub fn mutation(query: impl Into<String>) -> Self {
        Self::with_kind(query.into(), OperationKind::Mutation)
    }

    fn with_kind(query: String, kind: OperationKind) -> Self {
        Self {
            query,
            kind,
            variables: None,
            headers: HashMap::new(),
        }
    }

    /// Attaches variables to the request.
    #[must_use]
    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Adds a per-call header override.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the JSON body sent on the wire.
    #[must_use]
    pub fn to_body(&self) -> Value {
        match &self.variables {
            Some(variables) => json!({ "query": self.query, "variables": variables }),
            None => json!({ "query": self.query }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_omits_missing_variables() {
        let body = GraphqlRequest::query("query { me { id } }").to_body();
        assert_eq!(body, json!({ "query": "query { me { id } }" }));
        assert!(body.get("variables").is_none());
    }

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(GraphqlRequest::mutation("{ x }").kind, OperationKind::Mutation);
        assert_eq!(GraphqlRequest::query("mutation { x }").kind, OperationKind::Query);
        assert_eq!(GraphqlRequest::new("mutation { x }").kind, OperationKind::Mutation);
    }

    #[test]
    fn test_with_header_overwrites_same_name() {
        let request = GraphqlRequest::new("{ me { id } }")
            .with_header("Authorization", "a")
            .with_header("Authorization", "b");
        assert_eq!(request.headers.get("Authorization").map(String::as_str), Some("b"));
    }
}
