//! User lookups.

use std::collections::HashSet;

use super::{decode_field, RepeatedPage};
use crate::clients::{GraphqlRequest, MondayClient, MondayError};
use crate::query::{build_graphql_query, Arg, Fields, OperationKind};
use crate::types::User;

/// Which users to include.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserKind {
    /// Every user.
    #[default]
    All,
    /// Members and viewers, excluding guests.
    NonGuests,
    /// Guests only.
    Guests,
    /// Everyone who accepted their invitation.
    NonPending,
}

impl UserKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::NonGuests => "non_guests",
            Self::Guests => "guests",
            Self::NonPending => "non_pending",
        }
    }
}

/// Filters and paging for [`Users::query`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserQuery {
    /// Email filter.
    pub emails: Vec<String>,
    /// Id filter.
    pub ids: Vec<u64>,
    /// Name filter (server-side fuzzy match).
    pub name: Option<String>,
    /// Kind filter.
    pub kind: Option<UserKind>,
    /// Return the newest users first.
    pub newest_first: Option<bool>,
    /// Include disabled users.
    pub non_active: Option<bool>,
    /// Users per page.
    pub limit: u32,
    /// First page to fetch (1-based).
    pub page: u32,
    /// Whether to keep fetching pages.
    pub paginate: bool,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            emails: Vec::new(),
            ids: Vec::new(),
            name: None,
            kind: None,
            newest_first: None,
            non_active: None,
            limit: 50,
            page: 1,
            paginate: true,
        }
    }
}

impl UserQuery {
    /// Creates a query with default paging.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by email.
    #[must_use]
    pub fn emails<S: Into<String>>(mut self, emails: impl IntoIterator<Item = S>) -> Self {
        self.emails = emails.into_iter().map(Into::into).collect();
        self
    }

    /// Filters by id.
    #[must_use]
    pub fn ids(mut self, ids: Vec<u64>) -> Self {
        self.ids = ids;
        self
    }

    /// Filters by name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filters by kind.
    #[must_use]
    pub const fn kind(mut self, kind: UserKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Fetch only the first page.
    #[must_use]
    pub const fn single_page(mut self) -> Self {
        self.paginate = false;
        self
    }

    fn args(&self, page: u32) -> Vec<(&'static str, Option<Arg>)> {
        vec![
            ("emails", Arg::non_empty(&self.emails)),
            ("ids", Arg::non_empty(&self.ids)),
            ("name", Arg::opt(self.name.as_deref())),
            ("kind", self.kind.map(|k| Arg::enum_value(k.as_str()))),
            ("newest_first", Arg::opt(self.newest_first)),
            ("non_active", Arg::opt(self.non_active)),
            ("limit", Some(Arg::from(self.limit))),
            ("page", Some(Arg::from(page))),
        ]
    }
}

/// User operations, borrowed from [`MondayClient::users`].
#[derive(Clone, Copy, Debug)]
pub struct Users<'a> {
    client: &'a MondayClient,
}

impl<'a> Users<'a> {
    pub(crate) const fn new(client: &'a MondayClient) -> Self {
        Self { client }
    }

    /// Fetches users page by page.
    ///
    /// The walk stops at an empty page, a short page, or a page that
    /// repeats the previous one. Users are de-duplicated by id, keeping
    /// the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::InvalidInput`] for a zero limit or page, and
    /// any request or decode error.
    pub async fn query(&self, params: &UserQuery, fields: &Fields) -> Result<Vec<User>, MondayError> {
        if params.limit == 0 || params.page == 0 {
            return Err(MondayError::InvalidInput(
                "user limit and page must be greater than 0".to_string(),
            ));
        }
        let fields = fields.clone().with("id");

        let mut users: Vec<User> = Vec::new();
        let mut seen: HashSet<u64> = HashSet::new();
        let mut repeated = RepeatedPage::default();
        let mut page = params.page;
        loop {
            let query = build_graphql_query("users", OperationKind::Query, &params.args(page), &fields);
            let data = self.client.execute(&GraphqlRequest::query(query)).await?;
            let batch: Vec<User> = decode_field(&data, "users")?;
            if batch.is_empty() {
                break;
            }

            if repeated.check(batch.iter().map(|user| user.id).collect()) {
                tracing::debug!(page, "User page repeated the previous page, stopping");
                break;
            }

            let count = batch.len();
            for user in batch {
                match user.id {
                    Some(id) if !seen.insert(id) => {}
                    _ => users.push(user),
                }
            }

            if count < params.limit as usize || !params.paginate {
                break;
            }
            page += 1;
        }
        Ok(users)
    }
}
