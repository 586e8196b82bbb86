use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

/// A monday.com account user.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct User {
    /// The unique identifier of the user.
    #[serde(default, deserialize_with = "de::optional_id")]
    pub id: Option<u64>,
    /// The user's name.
    pub name: Option<String>,
    /// The user's email.
    pub email: Option<String>,
    /// The user's title.
    pub title: Option<String>,
    /// Whether the user is active.
    pub enabled: Option<bool>,
    /// Whether the user is an account admin.
    pub is_admin: Option<bool>,
    /// Whether the user is a guest.
    pub is_guest: Option<bool>,
    /// Whether the user has not yet accepted their invite.
    pub is_pending: Option<bool>,
    /// Whether the user is a view-only member.
    pub is_view_only: Option<bool>,
    /// The user's phone number.
    pub phone: Option<String>,
    /// The user's location.
    pub location: Option<String>,
    /// The user's time zone, such as `Europe/London`.
    pub time_zone_identifier: Option<String>,
    /// The user's profile URL.
    pub url: Option<String>,
    /// When the user was created.
    pub created_at: Option<DateTime<Utc>>,
}
