//! Subitem operations.

use serde_json::Value;

use super::{decode_field, require_ids, require_name};
use crate::clients::{GraphqlRequest, MondayClient, MondayError};
use crate::query::{build_graphql_query, render_selection, Arg, Fields, OperationKind};
use crate::types::Item;

/// Input for [`Subitems::create`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateSubitem {
    /// The parent item.
    pub parent_item_id: u64,
    /// The subitem's name (required).
    pub subitem_name: String,
    /// Initial column values keyed by column id.
    pub column_values: Option<Value>,
    /// Create status and dropdown labels that do not exist yet.
    pub create_labels_if_missing: Option<bool>,
}

impl CreateSubitem {
    /// Creates an input under `parent_item_id`.
    #[must_use]
    pub fn new(parent_item_id: u64, subitem_name: impl Into<String>) -> Self {
        Self {
            parent_item_id,
            subitem_name: subitem_name.into(),
            ..Self::default()
        }
    }
}

/// The subitems of one parent item.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemSubitems {
    /// The parent item.
    pub item_id: u64,
    /// Its subitems.
    pub subitems: Vec<Item>,
}

/// Subitem operations, borrowed from [`MondayClient::subitems`].
#[derive(Clone, Copy, Debug)]
pub struct Subitems<'a> {
    client: &'a MondayClient,
}

impl<'a> Subitems<'a> {
    pub(crate) const fn new(client: &'a MondayClient) -> Self {
        Self { client }
    }

    /// Fetches the subitems of each item.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for an empty id list, and any
    /// request or decode error.
    pub async fn query(&self, item_ids: &[u64], fields: &Fields) -> Result<Vec<ItemSubitems>, MondayError> {
        require_ids(item_ids, "item id")?;

        let subitems = render_selection("subitems", &[], &fields.clone().with("id"));
        let query = build_graphql_query(
            "items",
            OperationKind::Query,
            &[("ids", Arg::non_empty(item_ids))],
            &Fields::new(format!("id {subitems}")),
        );
        let data = self.client.execute(&GraphqlRequest::query(query)).await?;
        let items: Vec<Item> = decode_field(&data, "items")?;

        Ok(items
            .into_iter()
            .map(|item| ItemSubitems {
                item_id: item.id.unwrap_or_default(),
                subitems: item.subitems.unwrap_or_default(),
            })
            .collect())
    }

    /// Creates a subitem.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for an empty name or
    /// non-object column values, and any request or decode error.
    pub async fn create(&self, input: &CreateSubitem, fields: &Fields) -> Result<Item, MondayError> {
        require_name(&input.subitem_name, "subitem name")?;
        let column_values = match &input.column_values {
            None => None,
            Some(values @ Value::Object(_)) => Some(Arg::JsonString(values.clone())),
            Some(_) => {
                return Err(MondayError::InvalidInput(
                    "column values must be a JSON object keyed by column id".to_string(),
                ))
            }
        };

        let query = build_graphql_query(
            "create_subitem",
            OperationKind::Mutation,
            &[
                ("parent_item_id", Some(Arg::from(input.parent_item_id))),
                ("item_name", Some(Arg::from(input.subitem_name.as_str()))),
                ("column_values", column_values),
                ("create_labels_if_missing", Arg::opt(input.create_labels_if_missing)),
            ],
            &fields.clone().with("id"),
        );
        let data = self.client.execute(&GraphqlRequest::mutation(query)).await?;
        decode_field(&data, "create_subitem")
    }
}
