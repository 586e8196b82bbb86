//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use monday_api::clients::{TransportRequest, TransportResponse};
use monday_api::{ApiKey, MondayClient, MondayConfig, Transport, TransportError};
use serde_json::{json, Value};

/// One scripted transport outcome.
#[derive(Clone, Debug)]
pub enum Step {
    Reply(u16, Value),
    Timeout,
    InvalidRequest,
}

/// An in-memory transport that replays a fixed script.
///
/// The last step repeats once the script runs out, so a persistently
/// failing endpoint needs only one step.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Number of sends observed so far.
    pub fn sends(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The GraphQL documents sent, in order.
    pub fn queries(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.body["query"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        let step = {
            let mut steps = self.steps.lock().unwrap();
            if steps.len() > 1 {
                steps.pop_front()
            } else {
                steps.front().cloned()
            }
        };

        match step.expect("script is empty") {
            Step::Reply(code, body) => Ok(TransportResponse::new(code, HashMap::new(), body)),
            Step::Timeout => Err(TransportError::Timeout {
                after: Duration::from_secs(60),
            }),
            Step::InvalidRequest => Err(TransportError::InvalidRequest(
                "invalid HTTP header name".to_string(),
            )),
        }
    }
}

/// Builds a client over `transport` with `max_retries` retries.
pub fn client(transport: Arc<ScriptedTransport>, max_retries: u32) -> MondayClient {
    let config = MondayConfig::builder()
        .api_key(ApiKey::new("test-token").unwrap())
        .max_retries(max_retries)
        .build()
        .unwrap();
    MondayClient::with_transport(config, transport)
}

pub fn ok(data: Value) -> Step {
    Step::Reply(200, json!({ "data": data }))
}

pub fn complexity(reset_secs: u64) -> Step {
    Step::Reply(
        200,
        json!({
            "errors": [{
                "message": format!(
                    "Complexity budget exhausted, query cost 30001 budget remaining 10 out of 1000000 reset in {reset_secs} seconds"
                ),
                "extensions": {"code": "COMPLEXITY_BUDGET_EXHAUSTED"}
            }]
        }),
    )
}

pub fn mutation_limit(reset_secs: u64) -> Step {
    Step::Reply(
        429,
        json!({
            "errors": [{
                "message": format!("Rate limit exceeded, reset in {reset_secs} seconds"),
                "extensions": {"code": "RATE_LIMIT_EXCEEDED"}
            }]
        }),
    )
}

pub fn parse_error() -> Step {
    Step::Reply(
        200,
        json!({
            "errors": [{
                "message": "Parse error on \"}\" (RCURLY) at [1, 12]",
                "extensions": {"code": "GRAPHQL_VALIDATION_FAILED"}
            }]
        }),
    )
}

pub fn server_error() -> Step {
    Step::Reply(500, json!({"error_message": "Internal server error", "status_code": 500}))
}

/// A `{cursor, items}` page under `next_items_page` with `count` items
/// numbered from `first_id`.
pub fn page(cursor: Option<&str>, first_id: u64, count: u64) -> Step {
    let items: Vec<Value> = (first_id..first_id + count)
        .map(|id| json!({"id": id.to_string(), "name": format!("Item {id}")}))
        .collect();
    ok(json!({"next_items_page": {"cursor": cursor, "items": items}}))
}

/// The same page shape nested the way `items_page` returns it.
pub fn board_page(cursor: Option<&str>, first_id: u64, count: u64) -> Step {
    let items: Vec<Value> = (first_id..first_id + count)
        .map(|id| json!({"id": id.to_string(), "name": format!("Item {id}")}))
        .collect();
    ok(json!({"boards": [{"items_page": {"cursor": cursor, "items": items}}]}))
}
