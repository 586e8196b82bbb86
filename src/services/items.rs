//! Item operations.

use serde_json::Value;

use super::{decode_field, require_ids, require_name, RepeatedPage};
use crate::clients::pagination::column_values_pages;
use crate::clients::{GraphqlRequest, MondayClient, MondayError, Paginator};
use crate::query::{build_graphql_query, Arg, ColumnFilter, Fields, OperationKind};
use crate::types::Item;

/// Where a new item is placed relative to `relative_to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionRelativeMethod {
    /// Directly above the reference item.
    BeforeAt,
    /// Directly below the reference item.
    AfterAt,
}

impl PositionRelativeMethod {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::BeforeAt => "before_at",
            Self::AfterAt => "after_at",
        }
    }
}

/// Paging for [`Items::query`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemQuery {
    /// Items per page.
    pub limit: u32,
    /// First page to fetch (1-based).
    pub page: u32,
    /// Return the newest items first.
    pub newest_first: bool,
    /// Skip archived and deleted items.
    pub exclude_nonactive: bool,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            limit: 25,
            page: 1,
            newest_first: false,
            exclude_nonactive: false,
        }
    }
}

/// Input for [`Items::create`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateItem {
    /// Target board.
    pub board_id: u64,
    /// The new item's name (required).
    pub item_name: String,
    /// Initial column values keyed by column id.
    pub column_values: Option<Value>,
    /// Target group; the board's top group when omitted.
    pub group_id: Option<String>,
    /// Create status and dropdown labels that do not exist yet.
    pub create_labels_if_missing: Option<bool>,
    /// Placement relative to `relative_to`.
    pub position_relative_method: Option<PositionRelativeMethod>,
    /// Reference item for placement.
    pub relative_to: Option<u64>,
}

impl CreateItem {
    /// Creates an input for `board_id` with the given name.
    #[must_use]
    pub fn new(board_id: u64, item_name: impl Into<String>) -> Self {
        Self {
            board_id,
            item_name: item_name.into(),
            ..Self::default()
        }
    }

    /// Sets the initial column values.
    #[must_use]
    pub fn column_values(mut self, values: Value) -> Self {
        self.column_values = Some(values);
        self
    }

    /// Places the item in `group_id`.
    #[must_use]
    pub fn group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }
}

/// Input for [`Items::move_to_board`].
///
/// Column mappings pair a source column id with a target column id. A
/// `None` target drops the column's value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveToBoard {
    /// Destination board.
    pub board_id: u64,
    /// Destination group.
    pub group_id: String,
    /// Item column mapping.
    pub columns_mapping: Vec<(String, Option<String>)>,
    /// Subitem column mapping.
    pub subitems_columns_mapping: Vec<(String, Option<String>)>,
}

fn mapping_arg(mapping: &[(String, Option<String>)]) -> Option<Arg> {
    if mapping.is_empty() {
        return None;
    }
    Some(Arg::List(
        mapping
            .iter()
            .map(|(source, target)| {
                let target = target.as_deref().map_or(Arg::Null, Arg::from);
                Arg::object([("source", Arg::from(source.as_str())), ("target", target)])
            })
            .collect(),
    ))
}

fn column_values_arg(values: Option<&Value>) -> Result<Option<Arg>, MondayError> {
    match values {
        None => Ok(None),
        Some(Value::Object(_)) => Ok(values.cloned().map(Arg::JsonString)),
        Some(_) => Err(MondayError::InvalidInput(
            "column values must be a JSON object keyed by column id".to_string(),
        )),
    }
}

/// Item operations, borrowed from [`MondayClient::items`].
#[derive(Clone, Copy, Debug)]
pub struct Items<'a> {
    client: &'a MondayClient,
}

impl<'a> Items<'a> {
    pub(crate) const fn new(client: &'a MondayClient) -> Self {
        Self { client }
    }

    /// Fetches items by id, page by page, until a page comes back empty or
    /// repeats the previous page.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for an empty id list or a zero
    /// limit, and any request or decode error.
    pub async fn query(&self, item_ids: &[u64], params: &ItemQuery, fields: &Fields) -> Result<Vec<Item>, MondayError> {
        require_ids(item_ids, "item id")?;
        if params.limit == 0 || params.page == 0 {
            return Err(MondayError::InvalidInput(
                "item limit and page must be greater than 0".to_string(),
            ));
        }

        let fields = fields.clone().with("id");
        let mut items = Vec::new();
        let mut repeated = RepeatedPage::default();
        let mut page = params.page;
        loop {
            let query = build_graphql_query(
                "items",
                OperationKind::Query,
                &[
                    ("ids", Arg::non_empty(item_ids)),
                    ("limit", Some(Arg::from(params.limit))),
                    ("page", Some(Arg::from(page))),
                    ("newest_first", Some(Arg::from(params.newest_first))),
                    ("exclude_nonactive", Some(Arg::from(params.exclude_nonactive))),
                ],
                &fields,
            );
            let data = self.client.execute(&GraphqlRequest::query(query)).await?;
            let batch: Vec<Item> = decode_field(&data, "items")?;
            if batch.is_empty() {
                break;
            }
            if repeated.check(batch.iter().map(|item| item.id).collect()) {
                tracing::debug!(page, "Item page repeated the previous page, stopping");
                break;
            }
            items.extend(batch);
            page += 1;
        }
        Ok(items)
    }

    /// Creates an item.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for an empty name or
    /// non-object column values, and any request or decode error.
    pub async fn create(&self, input: &CreateItem, fields: &Fields) -> Result<Item, MondayError> {
        require_name(&input.item_name, "item name")?;
        let column_values = column_values_arg(input.column_values.as_ref())?;

        let query = build_graphql_query(
            "create_item",
            OperationKind::Mutation,
            &[
                ("board_id", Some(Arg::from(input.board_id))),
                ("item_name", Some(Arg::from(input.item_name.as_str()))),
                ("column_values", column_values),
                ("group_id", Arg::opt(input.group_id.as_deref())),
                ("create_labels_if_missing", Arg::opt(input.create_labels_if_missing)),
                (
                    "position_relative_method",
                    input.position_relative_method.map(|m| Arg::enum_value(m.as_str())),
                ),
                ("relative_to", Arg::opt(input.relative_to)),
            ],
            &fields.clone().with("id"),
        );
        self.mutate("create_item", query).await
    }

    /// Duplicates an item on its board.
    ///
    /// # Errors
    ///
    /// Returns any request or decode error.
    pub async fn duplicate(
        &self,
        item_id: u64,
        board_id: u64,
        with_updates: bool,
        fields: &Fields,
    ) -> Result<Item, MondayError> {
        let query = build_graphql_query(
            "duplicate_item",
            OperationKind::Mutation,
            &[
                ("board_id", Some(Arg::from(board_id))),
                ("item_id", Some(Arg::from(item_id))),
                ("with_updates", Some(Arg::from(with_updates))),
            ],
            &fields.clone().with("id"),
        );
        self.mutate("duplicate_item", query).await
    }

    /// Moves an item to another group on the same board.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for an empty group id, and any
    /// request or decode error.
    pub async fn move_to_group(&self, item_id: u64, group_id: &str, fields: &Fields) -> Result<Item, MondayError> {
        require_name(group_id, "group id")?;
        let query = build_graphql_query(
            "move_item_to_group",
            OperationKind::Mutation,
            &[
                ("item_id", Some(Arg::from(item_id))),
                ("group_id", Some(Arg::from(group_id))),
            ],
            &fields.clone().with("id"),
        );
        self.mutate("move_item_to_group", query).await
    }

    /// Moves an item to a group on another board.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for an empty group id, and any
    /// request or decode error.
    pub async fn move_to_board(&self, item_id: u64, target: &MoveToBoard, fields: &Fields) -> Result<Item, MondayError> {
        require_name(&target.group_id, "group id")?;
        let query = build_graphql_query(
            "move_item_to_board",
            OperationKind::Mutation,
            &[
                ("board_id", Some(Arg::from(target.board_id))),
                ("group_id", Some(Arg::from(target.group_id.as_str()))),
                ("item_id", Some(Arg::from(item_id))),
                ("columns_mapping", mapping_arg(&target.columns_mapping)),
                ("subitems_columns_mapping", mapping_arg(&target.subitems_columns_mapping)),
            ],
            &fields.clone().with("id"),
        );
        self.mutate("move_item_to_board", query).await
    }

    /// Archives an item.
    ///
    /// # Errors
    ///
    /// Returns any request or decode error.
    pub async fn archive(&self, item_id: u64, fields: &Fields) -> Result<Item, MondayError> {
        self.item_mutation("archive_item", item_id, fields).await
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns any request or decode error.
    pub async fn delete(&self, item_id: u64, fields: &Fields) -> Result<Item, MondayError> {
        self.item_mutation("delete_item", item_id, fields).await
    }

    /// Removes every update from an item.
    ///
    /// # Errors
    ///
    /// Returns any request or decode error.
    pub async fn clear_updates(&self, item_id: u64, fields: &Fields) -> Result<Item, MondayError> {
        self.item_mutation("clear_item_updates", item_id, fields).await
    }

    /// Changes several column values at once.
    ///
    /// `column_values` maps column ids to values, for example
    /// `{"status": {"label": "Done"}, "text": "hello"}`.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] if `column_values` is not a
    /// JSON object, and any request or decode error.
    pub async fn change_column_values(
        &self,
        board_id: u64,
        item_id: u64,
        column_values: &Value,
        create_labels_if_missing: Option<bool>,
        fields: &Fields,
    ) -> Result<Item, MondayError> {
        let column_values = column_values_arg(Some(column_values))?;
        let query = build_graphql_query(
            "change_multiple_column_values",
            OperationKind::Mutation,
            &[
                ("item_id", Some(Arg::from(item_id))),
                ("board_id", Some(Arg::from(board_id))),
                ("column_values", column_values),
                ("create_labels_if_missing", Arg::opt(create_labels_if_missing)),
            ],
            &fields.clone().with("id"),
        );
        self.mutate("change_multiple_column_values", query).await
    }

    /// Walks every item on `board_id` whose columns match `columns`.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for an empty filter and
    /// [`MondayError::Pagination`] if the walk fails.
    pub async fn page_by_column_values(
        &self,
        board_id: u64,
        columns: &[ColumnFilter],
        paginator: Paginator,
        fields: &Fields,
    ) -> Result<Vec<Item>, MondayError> {
        require_ids(columns, "column filter")?;
        paginator
            .collect(self.client, column_values_pages(board_id, columns.to_vec(), fields.clone()))
            .await
    }

    async fn item_mutation(&self, operation: &str, item_id: u64, fields: &Fields) -> Result<Item, MondayError> {
        let query = build_graphql_query(
            operation,
            OperationKind::Mutation,
            &[("item_id", Some(Arg::from(item_id)))],
            &fields.clone().with("id"),
        );
        self.mutate(operation, query).await
    }

    async fn mutate(&self, operation: &str, query: String) -> Result<Item, MondayError> {
        let data = self.client.execute(&GraphqlRequest::mutation(query)).await?;
        decode_field(&data, operation)
    }
}
