//! Typed item filters for `items_page` and `items_page_by_column_values`.

use super::Arg;

/// How the rules of a [`QueryParams`] combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RulesOperator {
    /// Every rule must match.
    #[default]
    And,
    /// Any rule may match.
    Or,
}

impl RulesOperator {
    const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// A single column condition.
///
/// `operator` is a monday.com `ItemsQueryRuleOperator` such as `any_of`,
/// `not_any_of`, `is_empty` or `contains_text`; it defaults to `any_of`
/// on the server when omitted.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryRule {
    /// The column to compare.
    pub column_id: String,
    /// Values to compare against.
    pub compare_value: Vec<Arg>,
    /// Comparison operator.
    pub operator: Option<String>,
}

impl QueryRule {
    /// Creates a rule with the server's default operator.
    #[must_use]
    pub fn new(column_id: impl Into<String>, compare_value: Vec<Arg>) -> Self {
        Self {
            column_id: column_id.into(),
            compare_value,
            operator: None,
        }
    }

    /// Sets the comparison operator.
    #[must_use]
    pub fn operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    fn to_arg(&self) -> Arg {
        let mut fields = vec![
            ("column_id".to_string(), Arg::from(self.column_id.as_str())),
            ("compare_value".to_string(), Arg::List(self.compare_value.clone())),
        ];
        if let Some(operator) = &self.operator {
            fields.push(("operator".to_string(), Arg::enum_value(operator.as_str())));
        }
        Arg::Object(fields)
    }
}

/// Sort order for an items page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderBy {
    /// The column to sort by.
    pub column_id: String,
    /// `true` for descending order.
    pub descending: bool,
}

/// Filter for the `query_params` argument of `items_page`.
///
/// # Example
///
/// ```rust
/// use monday_api::query::{Arg, QueryParams, QueryRule};
///
/// let params = QueryParams::new()
///     .rule(QueryRule::new("status", vec![Arg::from("Done")]).operator("any_of"));
/// assert_eq!(
///     params.to_arg().to_string(),
///     r#"{rules: [{column_id: "status", compare_value: ["Done"], operator: any_of}], operator: and}"#
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParams {
    /// Item ids to restrict the page to.
    pub ids: Vec<u64>,
    /// Column rules.
    pub rules: Vec<QueryRule>,
    /// How rules combine.
    pub operator: RulesOperator,
    /// Sort order.
    pub order_by: Vec<OrderBy>,
}

impl QueryParams {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column rule.
    #[must_use]
    pub fn rule(mut self, rule: QueryRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets how rules combine.
    #[must_use]
    pub const fn operator(mut self, operator: RulesOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Restricts the page to the given item ids.
    #[must_use]
    pub fn ids(mut self, ids: Vec<u64>) -> Self {
        self.ids = ids;
        self
    }

    /// Adds a sort column.
    #[must_use]
    pub fn order_by(mut self, column_id: impl Into<String>, descending: bool) -> Self {
        self.order_by.push(OrderBy {
            column_id: column_id.into(),
            descending,
        });
        self
    }

    /// Renders the filter as an input object.
    #[must_use]
    pub fn to_arg(&self) -> Arg {
        let mut fields = Vec::new();
        if !self.ids.is_empty() {
            fields.push(("ids".to_string(), Arg::from(self.ids.clone())));
        }
        if !self.rules.is_empty() {
            fields.push((
                "rules".to_string(),
                Arg::List(self.rules.iter().map(QueryRule::to_arg).collect()),
            ));
            fields.push((
                "operator".to_string(),
                Arg::enum_value(self.operator.as_str()),
            ));
        }
        if !self.order_by.is_empty() {
            let order = self
                .order_by
                .iter()
                .map(|o| {
                    Arg::object([
                        ("column_id", Arg::from(o.column_id.as_str())),
                        (
                            "direction",
                            Arg::enum_value(if o.descending { "desc" } else { "asc" }),
                        ),
                    ])
                })
                .collect();
            fields.push(("order_by".to_string(), Arg::List(order)));
        }
        Arg::Object(fields)
    }
}

/// A column/value pair for `items_page_by_column_values`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnFilter {
    /// The column to match.
    pub column_id: String,
    /// Accepted values; an item matches if its column holds any of them.
    pub column_values: Vec<String>,
}

impl ColumnFilter {
    /// Creates a filter for one column.
    #[must_use]
    pub fn new<S: Into<String>>(
        column_id: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            column_id: column_id.into(),
            column_values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn to_arg(&self) -> Arg {
        Arg::object([
            ("column_id", Arg::from(self.column_id.as_str())),
            ("column_values", Arg::from(self.column_values.clone())),
        ])
    }
}
