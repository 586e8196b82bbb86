//! The monday.com GraphQL client.
//!
//! This module provides [`MondayClient`], which resolves headers, sends
//! requests through a [`Transport`], and drives the retry engine.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::classify::classify;
use crate::clients::errors::MondayError;
use crate::clients::headers::{current_headers, merge_headers};
use crate::clients::http_request::GraphqlRequest;
use crate::clients::retry::{execute_with_retry, RetryPolicy};
use crate::clients::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::config::MondayConfig;
use crate::services::{Boards, Groups, Items, Subitems, Users};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Async client for the monday.com GraphQL API.
///
/// The client handles:
/// - Default headers including `Authorization`, `API-Version` and `User-Agent`
/// - Scoped and per-call header overrides
/// - Classification of limit, query format and generic errors
/// - Bounded retries with backoff
///
/// # Thread Safety
///
/// `MondayClient` is `Send + Sync` and cheap to clone. Calls share no
/// mutable state; each owns its own retry bookkeeping.
///
/// # Example
///
/// ```rust,ignore
/// use monday_api::{ApiKey, MondayClient, MondayConfig};
/// use monday_api::query::Fields;
///
/// let config = MondayConfig::builder()
///     .api_key(ApiKey::new("my-token").unwrap())
///     .build()
///     .unwrap();
/// let client = MondayClient::new(config)?;
///
/// let data = client.post_request("query { me { id name } }").await?;
/// println!("{}", data["me"]["name"]);
///
/// let items = client.items().query(&[123], &Default::default(), &Fields::new("id name")).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MondayClient {
    transport: Arc<dyn Transport>,
    config: MondayConfig,
    default_headers: HashMap<String, String>,
    policy: RetryPolicy,
}

// Verify MondayClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MondayClient>();
};

impl MondayClient {
    /// Creates a client that sends requests with [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`MondayError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: MondayConfig) -> Result<Self, MondayError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(config: MondayConfig, transport: Arc<dyn Transport>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}monday API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert(
            "Authorization".to_string(),
            config.api_key().as_ref().to_string(),
        );
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);
        if let Some(version) = config.api_version() {
            default_headers.insert("API-Version".to_string(), version.to_string());
        }

        let policy = RetryPolicy::from_config(&config);

        Self {
            transport,
            config,
            default_headers,
            policy,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &MondayConfig {
        &self.config
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the retry policy derived from the configuration.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Sends `request` with retries and returns its `data` payload.
    ///
    /// Headers are resolved once per call: client defaults, then the active
    /// [`with_headers`](crate::clients::with_headers) scope, then the
    /// request's own headers. Every retry resends the same descriptor.
    ///
    /// # Errors
    ///
    /// Returns the classified [`MondayError`] once retries are spent, or
    /// immediately for query format errors.
    pub async fn execute(&self, request: &GraphqlRequest) -> Result<Value, MondayError> {
        let transport_request = self.resolve(request);
        let fallback_reset = self.policy.fallback_reset;

        tracing::debug!(kind = %request.kind, url = %transport_request.url, "Sending GraphQL request");

        let transport = self.transport.as_ref();
        let transport_request = &transport_request;
        execute_with_retry(&self.policy, || async move {
            let response = transport.send(transport_request).await?;
            classify(&response, fallback_reset)
        })
        .await
    }

    /// Sends a raw GraphQL document and returns its `data` payload.
    ///
    /// The operation kind is inferred from the leading keyword.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn post_request(&self, query: impl Into<String>) -> Result<Value, MondayError> {
        self.execute(&GraphqlRequest::new(query)).await
    }

    /// Board operations.
    #[must_use]
    pub const fn boards(&self) -> Boards<'_> {
        Boards::new(self)
    }

    /// Item operations.
    #[must_use]
    pub const fn items(&self) -> Items<'_> {
        Items::new(self)
    }

    /// Group operations.
    #[must_use]
    pub const fn groups(&self) -> Groups<'_> {
        Groups::new(self)
    }

    /// User operations.
    #[must_use]
    pub const fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    /// Subitem operations.
    #[must_use]
    pub const fn subitems(&self) -> Subitems<'_> {
        Subitems::new(self)
    }

    fn resolve(&self, request: &GraphqlRequest) -> TransportRequest {
        let mut headers = self.default_headers.clone();
        merge_headers(&mut headers, current_headers());
        merge_headers(&mut headers, request.headers.clone());

        TransportRequest {
            url: self.config.base_url().as_ref().to_string(),
            headers,
            body: request.to_body(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::errors::TransportError;
    use crate::clients::headers::with_headers;
    use crate::clients::http_response::TransportResponse;
    use crate::config::{ApiKey, ApiVersion};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<TransportRequest>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(
            &self,
            request: &TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(TransportResponse::new(
                200,
                HashMap::new(),
                json!({"data": {"me": {"id": "1"}}}),
            ))
        }
    }

    fn client_with(transport: Arc<RecordingTransport>) -> MondayClient {
        let config = MondayConfig::builder()
            .api_key(ApiKey::new("default-token").unwrap())
            .api_version(ApiVersion::V2024_10)
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        MondayClient::with_transport(config, transport)
    }

    #[test]
    fn test_default_headers() {
        let client = client_with(Arc::default());
        let headers = client.default_headers();

        assert_eq!(headers.get("Authorization").unwrap(), "default-token");
        assert_eq!(headers.get("Content-Type").unwrap(), "application/json");
        assert_eq!(headers.get("API-Version").unwrap(), "2024-10");
        let user_agent = headers.get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | monday API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_api_version_header_omitted_when_unset() {
        let config = MondayConfig::builder()
            .api_key(ApiKey::new("t").unwrap())
            .build()
            .unwrap();
        let client = MondayClient::with_transport(config, Arc::new(RecordingTransport::default()));
        assert!(!client.default_headers().contains_key("API-Version"));
    }

    #[tokio::test]
    async fn test_header_precedence() {
        let transport = Arc::new(RecordingTransport::default());
        let client = client_with(Arc::clone(&transport));

        let scoped = HashMap::from([
            ("authorization".to_string(), "scoped-token".to_string()),
            ("X-Scope".to_string(), "yes".to_string()),
        ]);
        let request = GraphqlRequest::query("query { me { id } }").with_header("X-Scope", "call");

        with_headers(scoped, client.execute(&request)).await.unwrap();

        let sent = transport.requests.lock().unwrap();
        let headers = &sent[0].headers;
        assert_eq!(headers.get("authorization").map(String::as_str), Some("scoped-token"));
        assert!(!headers.contains_key("Authorization"));
        assert_eq!(headers.get("X-Scope").map(String::as_str), Some("call"));
        assert_eq!(sent[0].url, "https://api.monday.com/v2");
        assert_eq!(sent[0].body, json!({"query": "query { me { id } }"}));
    }

    #[tokio::test]
    async fn test_post_request_returns_data() {
        let client = client_with(Arc::default());
        let data = client.post_request("query { me { id } }").await.unwrap();
        assert_eq!(data, json!({"me": {"id": "1"}}));
    }
}
