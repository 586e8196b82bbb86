//! The transport seam and its `reqwest` implementation.
//!
//! The retry engine talks to the network only through [`Transport`], so
//! tests can script responses and applications can supply their own HTTP
//! stack. [`ReqwestTransport`] is the default.

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_response::TransportResponse;

/// A fully resolved POST to the GraphQL endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRequest {
    /// The endpoint URL.
    pub url: String,
    /// Headers after merging defaults, scoped overrides and per-call headers.
    pub headers: HashMap<String, String>,
    /// The JSON body.
    pub body: serde_json::Value,
}

/// Sends one request and returns the raw response.
///
/// Implementations must not retry; the retry engine owns that policy.
/// Timeouts should be reported as [`TransportError::Timeout`], and requests
/// that cannot be built as [`TransportError::InvalidRequest`].
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Sends `request` and returns whatever the server answered.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no HTTP response was received.
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// The default transport, built on `reqwest` with rustls.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()?;
        Ok(Self { client, timeout })
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                after: self.timeout,
            }
        } else if error.is_builder() {
            // Nothing was sent.
            TransportError::InvalidRequest(error.to_string())
        } else {
            TransportError::Network(error)
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// Decodes a response body, keeping non-JSON text under `raw_body`.
pub(crate) fn parse_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::json!({});
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw_body": text }))
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.post(&request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        let res = builder
            .body(request.body.to_string())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let text = res.text().await.map_err(|e| self.map_error(e))?;

        Ok(TransportResponse::new(code, headers, parse_body(&text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_keeps_raw_text() {
        assert_eq!(
            parse_body("<html>Bad Gateway</html>"),
            json!({ "raw_body": "<html>Bad Gateway</html>" })
        );
    }

    #[test]
    fn test_parse_body_handles_empty_and_json() {
        assert_eq!(parse_body(""), json!({}));
        assert_eq!(parse_body(r#"{"data":{"me":null}}"#), json!({"data": {"me": null}}));
    }

    #[test]
    fn test_transport_keeps_configured_timeout() {
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        assert_eq!(transport.timeout(), Duration::from_secs(5));
    }
}
