//! Board operations.

use serde_json::Value;

use super::{decode_field, require_ids, require_name, RepeatedPage};
use crate::clients::pagination::board_items_pages;
use crate::clients::{GraphqlRequest, MondayClient, MondayError, Paginator};
use crate::query::{build_graphql_query, Arg, Fields, OperationKind, QueryParams};
use crate::types::{Board, Item};

/// Board visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoardKind {
    /// Visible to all account members.
    #[default]
    Public,
    /// Visible to invited members only.
    Private,
    /// Shareable with guests.
    Share,
}

impl BoardKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Share => "share",
        }
    }
}

/// Board state filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoardState {
    /// Active boards only.
    #[default]
    Active,
    /// Boards in any state.
    All,
    /// Archived boards only.
    Archived,
    /// Deleted boards only.
    Deleted,
}

impl BoardState {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::All => "all",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }
}

/// Board ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardsOrderBy {
    /// Newest first by creation time.
    CreatedAt,
    /// Most recently used first.
    UsedAt,
}

impl BoardsOrderBy {
    const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UsedAt => "used_at",
        }
    }
}

/// Board attribute accepted by `update_board`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardAttribute {
    /// The board's name.
    Name,
    /// The board's description.
    Description,
    /// The board's communication value.
    Communication,
}

impl BoardAttribute {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Communication => "communication",
        }
    }
}

/// What `duplicate_board` copies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateBoardType {
    /// Columns and groups only.
    #[default]
    WithStructure,
    /// Structure and items.
    WithPulses,
    /// Structure, items and updates.
    WithPulsesAndUpdates,
}

impl DuplicateBoardType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::WithStructure => "duplicate_board_with_structure",
            Self::WithPulses => "duplicate_board_with_pulses",
            Self::WithPulsesAndUpdates => "duplicate_board_with_pulses_and_updates",
        }
    }
}

/// Filters and paging for [`Boards::query`].
///
/// # Defaults
///
/// - `limit`: 25 boards per page
/// - `page`: 1
/// - `paginate`: `true` (fetch pages until a short or empty page)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardQuery {
    /// Board ids to fetch; empty for all boards.
    pub ids: Vec<u64>,
    /// Visibility filter.
    pub board_kind: Option<BoardKind>,
    /// State filter.
    pub state: Option<BoardState>,
    /// Workspace filter.
    pub workspace_ids: Vec<u64>,
    /// Ordering.
    pub order_by: Option<BoardsOrderBy>,
    /// Boards per page.
    pub limit: u32,
    /// First page to fetch (1-based).
    pub page: u32,
    /// Whether to keep fetching pages.
    pub paginate: bool,
}

impl Default for BoardQuery {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            board_kind: None,
            state: None,
            workspace_ids: Vec::new(),
            order_by: None,
            limit: 25,
            page: 1,
            paginate: true,
        }
    }
}

impl BoardQuery {
    /// Creates a query with default paging.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the query to the given boards.
    #[must_use]
    pub fn ids(mut self, ids: Vec<u64>) -> Self {
        self.ids = ids;
        self
    }

    /// Filters by visibility.
    #[must_use]
    pub const fn board_kind(mut self, kind: BoardKind) -> Self {
        self.board_kind = Some(kind);
        self
    }

    /// Filters by state.
    #[must_use]
    pub const fn state(mut self, state: BoardState) -> Self {
        self.state = Some(state);
        self
    }

    /// Filters by workspace.
    #[must_use]
    pub fn workspace_ids(mut self, ids: Vec<u64>) -> Self {
        self.workspace_ids = ids;
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn order_by(mut self, order: BoardsOrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the first page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Fetch only the first page.
    #[must_use]
    pub const fn single_page(mut self) -> Self {
        self.paginate = false;
        self
    }

    fn validate(&self) -> Result<(), MondayError> {
        if self.limit == 0 || self.page == 0 {
            return Err(MondayError::InvalidInput(
                "board limit and page must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    fn args(&self, page: u32) -> Vec<(&'static str, Option<Arg>)> {
        vec![
            ("ids", Arg::non_empty(&self.ids)),
            ("board_kind", self.board_kind.map(|k| Arg::enum_value(k.as_str()))),
            ("state", self.state.map(|s| Arg::enum_value(s.as_str()))),
            ("workspace_ids", Arg::non_empty(&self.workspace_ids)),
            ("order_by", self.order_by.map(|o| Arg::enum_value(o.as_str()))),
            ("limit", Some(Arg::from(self.limit))),
            ("page", Some(Arg::from(page))),
        ]
    }
}

/// Input for [`Boards::create`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateBoard {
    /// The new board's name (required).
    pub name: String,
    /// Visibility.
    pub kind: BoardKind,
    /// Description.
    pub description: Option<String>,
    /// Destination folder.
    pub folder_id: Option<u64>,
    /// Template to copy.
    pub template_id: Option<u64>,
    /// Destination workspace.
    pub workspace_id: Option<u64>,
    /// Board owners.
    pub owner_ids: Vec<u64>,
    /// Board subscribers.
    pub subscriber_ids: Vec<u64>,
    /// Subscribing teams.
    pub subscriber_teams_ids: Vec<u64>,
}

impl CreateBoard {
    /// Creates an input with the given name and defaults.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Input for [`Boards::duplicate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DuplicateBoard {
    /// Name of the copy; generated by monday.com when omitted.
    pub board_name: Option<String>,
    /// What to copy.
    pub duplicate_type: DuplicateBoardType,
    /// Destination folder. Required when duplicating to another workspace.
    pub folder_id: Option<u64>,
    /// Whether to copy subscribers.
    pub keep_subscribers: Option<bool>,
    /// Destination workspace.
    pub workspace_id: Option<u64>,
}

/// Item paging for [`Boards::get_items`].
#[derive(Clone, Debug, PartialEq)]
pub struct ItemsQuery {
    /// Optional item filter.
    pub query_params: Option<QueryParams>,
    /// Items per page.
    pub page_size: u32,
    /// Stop after this many items per board.
    pub item_limit: Option<usize>,
}

impl Default for ItemsQuery {
    fn default() -> Self {
        Self {
            query_params: None,
            page_size: Paginator::DEFAULT_PAGE_SIZE,
            item_limit: None,
        }
    }
}

/// The items collected for one board.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardItems {
    /// The board the items belong to.
    pub board_id: u64,
    /// Items in page order.
    pub items: Vec<Item>,
}

/// Board operations, borrowed from [`MondayClient::boards`].
#[derive(Clone, Copy, Debug)]
pub struct Boards<'a> {
    client: &'a MondayClient,
}

impl<'a> Boards<'a> {
    pub(crate) const fn new(client: &'a MondayClient) -> Self {
        Self { client }
    }

    /// Fetches boards page by page.
    ///
    /// Stops at the first empty page, at a page shorter than `limit`, at a
    /// page that repeats the previous one, or after one page when
    /// `paginate` is off.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for a zero limit or page, and
    /// any request or decode error.
    pub async fn query(&self, params: &BoardQuery, fields: &Fields) -> Result<Vec<Board>, MondayError> {
        params.validate()?;

        let fields = fields.clone().with("id");
        let mut boards = Vec::new();
        let mut repeated = RepeatedPage::default();
        let mut page = params.page;
        loop {
            let query = build_graphql_query("boards", OperationKind::Query, &params.args(page), &fields);
            let data = self.client.execute(&GraphqlRequest::query(query)).await?;
            let batch: Vec<Board> = decode_field(&data, "boards")?;
            if !batch.is_empty() && repeated.check(batch.iter().map(|board| board.id).collect()) {
                tracing::debug!(page, "Board page repeated the previous page, stopping");
                break;
            }

            let count = batch.len();
            boards.extend(batch);
            if count == 0 || count < params.limit as usize || !params.paginate {
                break;
            }
            page += 1;
        }
        Ok(boards)
    }

    /// Creates a board.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for an empty name, and any
    /// request or decode error.
    pub async fn create(&self, input: &CreateBoard, fields: &Fields) -> Result<Board, MondayError> {
        require_name(&input.name, "board name")?;

        let query = build_graphql_query(
            "create_board",
            OperationKind::Mutation,
            &[
                ("board_name", Some(Arg::from(input.name.as_str()))),
                ("board_kind", Some(Arg::enum_value(input.kind.as_str()))),
                ("description", Arg::opt(input.description.as_deref())),
                ("folder_id", Arg::opt(input.folder_id)),
                ("template_id", Arg::opt(input.template_id)),
                ("workspace_id", Arg::opt(input.workspace_id)),
                ("board_owner_ids", Arg::non_empty(&input.owner_ids)),
                ("board_subscriber_ids", Arg::non_empty(&input.subscriber_ids)),
                ("board_subscriber_teams_ids", Arg::non_empty(&input.subscriber_teams_ids)),
            ],
            &fields.clone().with("id"),
        );
        let data = self.client.execute(&GraphqlRequest::mutation(query)).await?;
        decode_field(&data, "create_board")
    }

    /// Duplicates a board and returns the copy.
    ///
    /// # Errors
    ///
    /// Returns any request or decode error.
    pub async fn duplicate(
        &self,
        board_id: u64,
        input: &DuplicateBoard,
        fields: &Fields,
    ) -> Result<Board, MondayError> {
        let board_fields = Fields::new(format!("board {{ {} }}", fields.clone().with("id")));
        let query = build_graphql_query(
            "duplicate_board",
            OperationKind::Mutation,
            &[
                ("board_id", Some(Arg::from(board_id))),
                ("duplicate_type", Some(Arg::enum_value(input.duplicate_type.as_str()))),
                ("board_name", Arg::opt(input.board_name.as_deref())),
                ("folder_id", Arg::opt(input.folder_id)),
                ("keep_subscribers", Arg::opt(input.keep_subscribers)),
                ("workspace_id", Arg::opt(input.workspace_id)),
            ],
            &board_fields,
        );
        let data = self.client.execute(&GraphqlRequest::mutation(query)).await?;
        let duplicated: Value = decode_field(&data, "duplicate_board")?;
        decode_field(&duplicated, "board")
    }

    /// Updates one board attribute and returns the server's JSON result.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn update(
        &self,
        board_id: u64,
        attribute: BoardAttribute,
        new_value: &str,
    ) -> Result<Value, MondayError> {
        let query = build_graphql_query(
            "update_board",
            OperationKind::Mutation,
            &[
                ("board_id", Some(Arg::from(board_id))),
                ("board_attribute", Some(Arg::enum_value(attribute.as_str()))),
                ("new_value", Some(Arg::from(new_value))),
            ],
            &Fields::default(),
        );
        let data = self.client.execute(&GraphqlRequest::mutation(query)).await?;
        // `update_board` returns JSON as a string scalar.
        Ok(match data.get("update_board") {
            Some(Value::String(s)) => serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.clone())),
            Some(other) => other.clone(),
            None => Value::Null,
        })
    }

    /// Archives a board.
    ///
    /// # Errors
    ///
    /// Returns any request or decode error.
    pub async fn archive(&self, board_id: u64, fields: &Fields) -> Result<Board, MondayError> {
        self.board_mutation("archive_board", board_id, fields).await
    }

    /// Deletes a board.
    ///
    /// # Errors
    ///
    /// Returns any request or decode error.
    pub async fn delete(&self, board_id: u64, fields: &Fields) -> Result<Board, MondayError> {
        self.board_mutation("delete_board", board_id, fields).await
    }

    async fn board_mutation(&self, operation: &str, board_id: u64, fields: &Fields) -> Result<Board, MondayError> {
        let query = build_graphql_query(
            operation,
            OperationKind::Mutation,
            &[("board_id", Some(Arg::from(board_id)))],
            &fields.clone().with("id"),
        );
        let data = self.client.execute(&GraphqlRequest::mutation(query)).await?;
        decode_field(&data, operation)
    }

    /// Walks every item page of each board.
    ///
    /// Boards are walked one after another. `item_fields` is the selection
    /// inside `items { ... }`.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for an empty id list and
    /// [`MondayError::Pagination`] if any walk fails.
    pub async fn get_items(
        &self,
        board_ids: &[u64],
        query: &ItemsQuery,
        item_fields: &Fields,
    ) -> Result<Vec<BoardItems>, MondayError> {
        require_ids(board_ids, "board id")?;

        let paginator = Paginator::new(query.page_size).with_optional_limit(query.item_limit);
        let mut results = Vec::with_capacity(board_ids.len());
        for &board_id in board_ids {
            let items = paginator
                .collect(
                    self.client,
                    board_items_pages(board_id, query.query_params.clone(), item_fields.clone()),
                )
                .await?;
            results.push(BoardItems { board_id, items });
        }
        Ok(results)
    }
}
