//! Error types for monday.com API calls.
//!
//! # Error Handling
//!
//! Every client operation returns `Result<T, MondayError>`. The retry engine
//! owns all retry decisions; once its budget is spent the last classified
//! error is returned, never an empty or default value.
//!
//! - [`QueryFormatError`]: The server rejected the query structure (never retried)
//! - [`RateLimitError`]: Complexity or mutation limit hit; carries the reset interval
//! - [`ApiError`]: Any other API-level failure (retried with bounded backoff)
//! - [`TransportError`]: Network failure or timeout (retried like [`ApiError`]),
//!   or a request that could not be built (never retried)
//! - [`PaginationError`]: A cursor walk failed; partial results are discarded
//!
//! # Example
//!
//! ```rust,ignore
//! use monday_api::MondayError;
//!
//! match client.post_request("query { me { id } }").await {
//!     Ok(data) => println!("{data}"),
//!     Err(MondayError::ComplexityLimitExceeded(e)) => {
//!         println!("back off for {:?}", e.reset_in);
//!     }
//!     Err(MondayError::QueryFormat(e)) => println!("bad query: {e}"),
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::error::ConfigError;

/// Which server-side limit produced a [`RateLimitError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitKind {
    /// Per-query or per-minute complexity budget.
    Complexity,
    /// Per-minute mutation (or request) budget.
    Mutation,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complexity => f.write_str("Complexity"),
            Self::Mutation => f.write_str("Mutation"),
        }
    }
}

/// A complexity or mutation limit signal parsed from a failed response.
///
/// `reset_in` is taken from the server's own message whenever one is
/// present; the configured rate-limit window is used only as a fallback.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{kind} limit exceeded, reset in {} seconds", .reset_in.as_secs_f64())]
pub struct RateLimitError {
    /// The limit that was hit.
    pub kind: LimitKind,
    /// How long the server asked us to wait.
    pub reset_in: Duration,
    /// The raw response body.
    pub payload: serde_json::Value,
}

/// The server rejected the query itself (parse or schema validation error).
#[derive(Clone, Debug, Error, PartialEq)]
#[error("Invalid query: {message}")]
pub struct QueryFormatError {
    /// The first error message reported by the server.
    pub message: String,
    /// The raw response body.
    pub payload: serde_json::Value,
}

/// A generic API failure: non-2xx status, a GraphQL `errors` array, or a
/// response without `data`.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("API request failed with status {status}: {message}")]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// Error messages reported by the server, joined with `; `.
    pub message: String,
    /// The first error code reported by the server, if any.
    pub error_code: Option<String>,
    /// The raw response body.
    pub payload: serde_json::Value,
    /// The `X-Request-Id` header, for support tickets.
    pub request_id: Option<String>,
}

/// A failure below the HTTP response level.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {after:?}")]
    Timeout {
        /// The timeout that elapsed.
        after: Duration,
    },

    /// Network or connection error from the HTTP library.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request could not be built, for example an invalid header name.
    /// Nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any other transport failure, for non-reqwest transports.
    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` unless the failure happened before anything was sent.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidRequest(_))
    }
}

/// A cursor walk failed. The items collected before the failure are dropped.
#[derive(Debug, Error)]
#[error("Item pagination failed: {message}")]
pub struct PaginationError {
    /// What went wrong during the walk.
    pub message: String,
    /// The underlying request failure, if the walk stopped on one.
    #[source]
    pub source: Option<Box<MondayError>>,
}

impl PaginationError {
    /// Creates an error with no underlying request failure.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps a request failure encountered while fetching a page.
    #[must_use]
    pub fn from_source(source: MondayError) -> Self {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}

/// Unified error type for all client operations.
#[derive(Debug, Error)]
pub enum MondayError {
    /// Malformed query; never retried.
    #[error(transparent)]
    QueryFormat(#[from] QueryFormatError),

    /// Complexity budget exhausted and retries spent.
    #[error(transparent)]
    ComplexityLimitExceeded(RateLimitError),

    /// Mutation/request limit hit and retries spent.
    #[error(transparent)]
    MutationLimitExceeded(RateLimitError),

    /// A paginated fetch failed part-way.
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    /// Generic API failure after retries were spent.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Network failure or timeout after retries were spent.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A successful response did not match the expected shape.
    #[error("Unexpected response shape for {context}: {source}")]
    Decode {
        /// What was being decoded.
        context: String,
        /// The serde error.
        #[source]
        source: serde_json::Error,
    },

    /// An argument failed validation before any request was built.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The client could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<RateLimitError> for MondayError {
    fn from(error: RateLimitError) -> Self {
        match error.kind {
            LimitKind::Complexity => Self::ComplexityLimitExceeded(error),
            LimitKind::Mutation => Self::MutationLimitExceeded(error),
        }
    }
}

impl MondayError {
    /// Returns `true` if the retry engine may resend after this error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ComplexityLimitExceeded(_) | Self::MutationLimitExceeded(_) | Self::Api(_) => true,
            Self::Transport(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Returns the server-advised wait for limit errors.
    #[must_use]
    pub const fn reset_in(&self) -> Option<Duration> {
        match self {
            Self::ComplexityLimitExceeded(e) | Self::MutationLimitExceeded(e) => Some(e.reset_in),
            _ => None,
        }
    }

    pub(crate) fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }
}
