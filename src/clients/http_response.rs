//! Raw transport responses.
//!
//! This module provides [`TransportResponse`], the status/headers/body triple
//! every [`Transport`](crate::clients::Transport) returns. Classification
//! into data or typed errors happens later, in the classifier.

use std::collections::HashMap;
use std::time::Duration;

/// A response as received from the monday.com endpoint.
///
/// Header names are lowercased; a header may carry several values.
///
/// # Example
///
/// ```rust
/// use monday_api::clients::TransportResponse;
/// use serde_json::json;
/// use std::collections::HashMap;
/// use std::time::Duration;
///
/// let mut headers = HashMap::new();
/// headers.insert("Retry-After".to_string(), vec!["12".to_string()]);
///
/// let response = TransportResponse::new(429, headers, json!({}));
/// assert!(!response.is_ok());
/// assert_eq!(response.retry_after(), Some(Duration::from_secs(12)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded JSON body. Non-JSON bodies are kept as
    /// `{"raw_body": "<text>"}`.
    pub body: serde_json::Value,
}

impl TransportResponse {
    /// Creates a response, lowercasing header names.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::new();
        for (name, values) in headers {
            normalized
                .entry(name.to_lowercase())
                .or_default()
                .extend(values);
        }
        Self {
            code,
            headers: normalized,
            body,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    ///
    /// Include this id when reporting errors to monday.com support.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `Retry-After` header as a duration, if present and numeric.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}
