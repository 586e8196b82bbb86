//! # monday.com API Rust SDK
//!
//! An async Rust client for the monday.com GraphQL API, with typed records,
//! bounded retries and cursor pagination.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`MondayConfig`] and [`MondayConfigBuilder`]
//! - Validated newtypes for the API key and endpoint URL
//! - An async [`MondayClient`] that classifies errors and retries with backoff
//! - Cursor pagination for item pages via [`clients::Paginator`]
//! - Typed service facades for boards, items, groups, users and subitems
//! - Scoped header overrides that are safe across concurrent tasks
//!
//! ## Quick Start
//!
//! ```rust
//! use monday_api::{ApiKey, ApiVersion, MondayConfig};
//!
//! let config = MondayConfig::builder()
//!     .api_key(ApiKey::new("your-api-token").unwrap())
//!     .api_version(ApiVersion::V2024_10)
//!     .max_retries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_retries(), 3);
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use monday_api::{MondayClient, MondayConfig};
//! use monday_api::query::Fields;
//! use monday_api::services::BoardQuery;
//!
//! let client = MondayClient::new(MondayConfig::from_env()?)?;
//!
//! // Raw GraphQL
//! let data = client.post_request("query { me { id name } }").await?;
//!
//! // Typed facades
//! let boards = client
//!     .boards()
//!     .query(&BoardQuery::new().ids(vec![123]), &Fields::new("id name"))
//!     .await?;
//! ```
//!
//! ## Walking Item Pages
//!
//! ```rust,ignore
//! use monday_api::services::ItemsQuery;
//! use monday_api::query::Fields;
//!
//! let query = ItemsQuery { item_limit: Some(1_000), ..Default::default() };
//! let boards = client.boards().get_items(&[123], &query, &Fields::new("id name")).await?;
//! for board in boards {
//!     println!("board {} has {} items", board.board_id, board.items.len());
//! }
//! ```
//!
//! ## Overriding Headers
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use monday_api::clients::with_headers;
//!
//! let headers = HashMap::from([("Authorization".to_string(), "other-token".to_string())]);
//! let data = with_headers(headers, client.post_request("query { me { id } }")).await?;
//! ```
//!
//! ## Logging
//!
//! The client emits [`tracing`] events: `debug` per request, `warn` per
//! retry and `error` when retries run out. Nothing is printed unless the
//! application installs a subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and header scopes are per client or per task
//! - **Fail-fast validation**: Newtypes and facade arguments validate before any request
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **All-or-nothing pagination**: A failed walk never returns partial items

pub mod clients;
pub mod config;
pub mod error;
pub mod query;
pub mod services;
pub mod types;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, ApiUrl, ApiVersion, MondayConfig, MondayConfigBuilder};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    ApiError, GraphqlRequest, LimitKind, MondayClient, MondayError, PaginationError, Paginator,
    QueryFormatError, RateLimitError, RetryPolicy, Transport, TransportError,
};
