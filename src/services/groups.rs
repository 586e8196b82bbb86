//! Group operations.

use super::items::PositionRelativeMethod;
use super::{decode_field, require_ids, require_name};
use crate::clients::{GraphqlRequest, MondayClient, MondayError};
use crate::query::{build_graphql_query, render_selection, Arg, Fields, OperationKind};
use crate::types::{Board, Group};

/// Optional settings for [`Groups::create`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateGroup {
    /// Hex color such as `#ff642e`.
    pub group_color: Option<String>,
    /// Reference group for placement.
    pub relative_to: Option<String>,
    /// Placement relative to `relative_to`.
    pub position_relative_method: Option<PositionRelativeMethod>,
}

/// Optional settings for [`Groups::duplicate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Put the copy at the top of the board.
    pub add_to_top: Option<bool>,
    /// Title of the copy.
    pub group_title: Option<String>,
}

/// The groups found on one board.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardGroups {
    /// The board the groups belong to.
    pub board_id: u64,
    /// Groups in board order.
    pub groups: Vec<Group>,
}

/// Group operations, borrowed from [`MondayClient::groups`].
#[derive(Clone, Copy, Debug)]
pub struct Groups<'a> {
    client: &'a MondayClient,
}

impl<'a> Groups<'a> {
    pub(crate) const fn new(client: &'a MondayClient) -> Self {
        Self { client }
    }

    /// Fetches the groups of each board.
    ///
    /// `group_ids` narrows the result server-side. `group_name` keeps only
    /// groups whose title matches exactly.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for an empty board list, and any
    /// request or decode error.
    pub async fn query(
        &self,
        board_ids: &[u64],
        group_ids: &[String],
        group_name: Option<&str>,
        fields: &Fields,
    ) -> Result<Vec<BoardGroups>, MondayError> {
        require_ids(board_ids, "board id")?;

        let group_fields = if group_name.is_some() {
            fields.clone().with("title")
        } else {
            fields.clone()
        };
        let groups = render_selection("groups", &[("ids", Arg::non_empty(group_ids))], &group_fields);
        let query = build_graphql_query(
            "boards",
            OperationKind::Query,
            &[("ids", Arg::non_empty(board_ids))],
            &Fields::new(format!("id {groups}")),
        );
        let data = self.client.execute(&GraphqlRequest::query(query)).await?;
        let boards: Vec<Board> = decode_field(&data, "boards")?;

        Ok(boards
            .into_iter()
            .map(|board| {
                let groups = board
                    .groups
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|group| group_name.map_or(true, |name| group.title.as_deref() == Some(name)))
                    .collect();
                BoardGroups {
                    board_id: board.id.unwrap_or_default(),
                    groups,
                }
            })
            .collect())
    }

    /// Creates a group on a board.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for an empty name, and any
    /// request or decode error.
    pub async fn create(
        &self,
        board_id: u64,
        group_name: &str,
        options: &CreateGroup,
        fields: &Fields,
    ) -> Result<Group, MondayError> {
        require_name(group_name, "group name")?;
        let query = build_graphql_query(
            "create_group",
            OperationKind::Mutation,
            &[
                ("board_id", Some(Arg::from(board_id))),
                ("group_name", Some(Arg::from(group_name))),
                ("group_color", Arg::opt(options.group_color.as_deref())),
                ("relative_to", Arg::opt(options.relative_to.as_deref())),
                (
                    "position_relative_method",
                    options.position_relative_method.map(|m| Arg::enum_value(m.as_str())),
                ),
            ],
            &fields.clone().with("id"),
        );
        self.mutate("create_group", query).await
    }

    /// Duplicates a group.
    ///
    /// # Errors
    ///
    /// Returns any request or decode error.
    pub async fn duplicate(
        &self,
        board_id: u64,
        group_id: &str,
        options: &DuplicateGroup,
        fields: &Fields,
    ) -> Result<Group, MondayError> {
        require_name(group_id, "group id")?;
        let query = build_graphql_query(
            "duplicate_group",
            OperationKind::Mutation,
            &[
                ("board_id", Some(Arg::from(board_id))),
                ("group_id", Some(Arg::from(group_id))),
                ("add_to_top", Arg::opt(options.add_to_top)),
                ("group_title", Arg::opt(options.group_title.as_deref())),
            ],
            &fields.clone().with("id"),
        );
        self.mutate("duplicate_group", query).await
    }

    /// Archives a group.
    ///
    /// # Errors
    ///
    /// Returns any request or decode error.
    pub async fn archive(&self, board_id: u64, group_id: &str, fields: &Fields) -> Result<Group, MondayError> {
        self.group_mutation("archive_group", board_id, group_id, fields).await
    }

    /// Deletes a group and its items.
    ///
    /// # Errors
    ///
    /// Returns any request or decode error.
    pub async fn delete(&self, board_id: u64, group_id: &str, fields: &Fields) -> Result<Group, MondayError> {
        self.group_mutation("delete_group", board_id, group_id, fields).await
    }

    async fn group_mutation(
        &self,
        operation: &str,
        board_id: u64,
        group_id: &str,
        fields: &Fields,
    ) -> Result<Group, MondayError> {
        require_name(group_id, "group id")?;
        let query = build_graphql_query(
            operation,
            OperationKind::Mutation,
            &[
                ("board_id", Some(Arg::from(board_id))),
                ("group_id", Some(Arg::from(group_id))),
            ],
            &fields.clone().with("id"),
        );
        self.mutate(operation, query).await
    }

    async fn mutate(&self, operation: &str, query: String) -> Result<Group, MondayError> {
        let data = self.client.execute(&GraphqlRequest::mutation(query)).await?;
        decode_field(&data, operation)
    }
}
