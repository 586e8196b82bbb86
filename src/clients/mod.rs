//! Client layer for monday.com API communication.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`MondayClient`]: The async GraphQL client
//! - [`GraphqlRequest`]: A query or mutation to send
//! - [`Transport`]: The network seam, with [`ReqwestTransport`] as default
//! - [`TransportResponse`]: A raw response before classification
//! - [`RetryPolicy`]: Retry budget and backoff parameters
//! - [`Paginator`]: The cursor walker for item pages
//! - [`MondayError`]: The unified error type
//!
//! # Example
//!
//! ```rust,ignore
//! use monday_api::{ApiKey, MondayClient, MondayConfig};
//! use monday_api::clients::GraphqlRequest;
//! use serde_json::json;
//!
//! let config = MondayConfig::from_env()?;
//! let client = MondayClient::new(config)?;
//!
//! let request = GraphqlRequest::query("query ($ids: [ID!]) { boards (ids: $ids) { id name } }")
//!     .with_variables(json!({ "ids": [123] }));
//! let data = client.execute(&request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **Complexity / mutation limit**: waits the server's "reset in N seconds"
//! - **Generic API errors, 5xx, timeouts**: exponential backoff, capped
//! - **Query format errors**: returned immediately, never retried
//!
//! The default `max_retries` is 4, so a call is sent at most 5 times.

pub mod classify;
mod errors;
pub mod graphql;
mod headers;
mod http_request;
mod http_response;
pub mod pagination;
pub mod retry;
mod transport;

pub use classify::{classify, parse_reset_in};
pub use errors::{
    ApiError, LimitKind, MondayError, PaginationError, QueryFormatError, RateLimitError,
    TransportError,
};
pub use graphql::{MondayClient, SDK_VERSION};
pub use headers::{current_headers, with_headers};
pub use http_request::GraphqlRequest;
pub use http_response::TransportResponse;
pub use pagination::{PageRequest, Paginator};
pub use retry::RetryPolicy;
pub use transport::{ReqwestTransport, Transport, TransportRequest};
