//! Response classification.
//!
//! [`classify`] turns a raw [`TransportResponse`] into either the `data`
//! payload or a typed [`MondayError`]. It is pure: no logging, no sleeping.
//!
//! monday.com reports limit errors in two shapes. The GraphQL shape is an
//! `errors` array whose entries carry `message` and `extensions.code`.
//! The legacy shape is a top-level object with `error_code`,
//! `error_message` and `status_code`. Both are read.
//!
//! The wait interval is parsed from the human-readable "reset in N seconds"
//! phrase of the error message. That phrase is an external message format,
//! not a documented protocol, so structured fallbacks
//! (`extensions.retry_in_seconds`, then `Retry-After`) are consulted when it
//! is absent.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde_json::Value;

use crate::clients::errors::{ApiError, LimitKind, MondayError, QueryFormatError, RateLimitError};
use crate::clients::http_response::TransportResponse;

static RESET_IN_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?i)reset in (\d+(?:\.\d+)?) seconds?"));

const COMPLEXITY_CODES: &[&str] = &["ComplexityException", "COMPLEXITY_BUDGET_EXHAUSTED"];

const RATE_LIMIT_CODES: &[&str] = &[
    "RATE_LIMIT_EXCEEDED",
    "MUTATION_LIMIT_EXCEEDED",
    "Rate Limit Exceeded",
];

const QUERY_FORMAT_CODES: &[&str] = &[
    "GRAPHQL_VALIDATION_FAILED",
    "argumentLiteralsIncompatible",
    "undefinedField",
    "undefinedType",
    "missingRequiredArguments",
    "fieldMissingSelection",
    "selectionMismatch",
    "parseError",
];

/// One error entry, normalized across the GraphQL and legacy shapes.
#[derive(Debug, Default)]
struct ErrorEntry {
    message: String,
    code: Option<String>,
    status_code: Option<u16>,
    retry_in_seconds: Option<f64>,
}

impl ErrorEntry {
    fn from_graphql(value: &Value) -> Self {
        if let Some(message) = value.as_str() {
            return Self {
                message: message.to_string(),
                ..Self::default()
            };
        }
        let extensions = value.get("extensions");
        Self {
            message: string_field(value, "message").unwrap_or_default(),
            code: extensions.and_then(|ext| string_field(ext, "code")),
            status_code: extensions.and_then(|ext| status_field(ext, "status_code")),
            retry_in_seconds: extensions
                .and_then(|ext| ext.get("retry_in_seconds"))
                .and_then(number_like),
        }
    }

    fn from_legacy(body: &Value) -> Option<Self> {
        let code = string_field(body, "error_code");
        let message = string_field(body, "error_message").or_else(|| string_field(body, "error"));
        let status_code = status_field(body, "status_code");
        if code.is_none() && message.is_none() && !status_code.is_some_and(|s| s >= 400) {
            return None;
        }
        Some(Self {
            message: message.unwrap_or_default(),
            code,
            status_code,
            retry_in_seconds: None,
        })
    }

    fn has_code(&self, codes: &[&str]) -> bool {
        self.code.as_deref().is_some_and(|code| codes.contains(&code))
    }

    fn is_complexity(&self) -> bool {
        let message = self.message.to_lowercase();
        self.has_code(COMPLEXITY_CODES)
            || message.contains("complexity budget")
            || message.contains("complexity limit")
    }

    fn is_rate_limit(&self) -> bool {
        self.status_code == Some(429)
            || self.has_code(RATE_LIMIT_CODES)
            || self.message.to_lowercase().contains("rate limit exceeded")
    }

    fn is_query_format(&self) -> bool {
        self.has_code(QUERY_FORMAT_CODES) || self.message.starts_with("Parse error on")
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn status_field(value: &Value, key: &str) -> Option<u16> {
    value
        .get(key)
        .and_then(number_like)
        .filter(|n| (0.0..=f64::from(u16::MAX)).contains(n))
        .map(|n| n as u16)
}

fn collect_entries(body: &Value) -> Vec<ErrorEntry> {
    let mut entries: Vec<ErrorEntry> = match body.get("errors") {
        Some(Value::Array(errors)) => errors.iter().map(ErrorEntry::from_graphql).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![ErrorEntry::from_graphql(other)],
    };
    entries.extend(ErrorEntry::from_legacy(body));
    entries
}

/// Parses the "reset in N seconds" phrase from a limit message.
///
/// # Example
///
/// ```rust
/// use monday_api::clients::parse_reset_in;
/// use std::time::Duration;
///
/// assert_eq!(
///     parse_reset_in("Complexity budget exhausted, reset in 7 seconds"),
///     Some(Duration::from_secs(7))
/// );
/// assert_eq!(parse_reset_in("Rate limit exceeded"), None);
/// ```
#[must_use]
pub fn parse_reset_in(message: &str) -> Option<Duration> {
    let re = RESET_IN_RE.as_ref().ok()?;
    let secs: f64 = re.captures(message)?.get(1)?.as_str().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}

fn reset_in(
    entries: &[&ErrorEntry],
    response: &TransportResponse,
    fallback_reset: Duration,
) -> Duration {
    entries
        .iter()
        .find_map(|entry| parse_reset_in(&entry.message))
        .or_else(|| {
            entries
                .iter()
                .find_map(|entry| entry.retry_in_seconds)
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        })
        .or_else(|| response.retry_after())
        .unwrap_or(fallback_reset)
}

fn matching(entries: &[ErrorEntry], pred: fn(&ErrorEntry) -> bool) -> Vec<&ErrorEntry> {
    entries.iter().filter(|entry| pred(entry)).collect()
}

fn joined_messages(entries: &[ErrorEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.message.as_str())
        .filter(|message| !message.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Classifies a response into its `data` payload or a typed error.
///
/// Rules, first match wins:
///
/// 1. 2xx, no error entries, non-null `data`: `Ok(data)`.
/// 2. A complexity code or a message mentioning complexity:
///    [`MondayError::ComplexityLimitExceeded`].
/// 3. HTTP 429, a body `status_code` of 429, or a rate-limit code:
///    [`MondayError::MutationLimitExceeded`].
/// 4. A query validation code, or a message starting `Parse error on`:
///    [`MondayError::QueryFormat`].
/// 5. Anything else: [`MondayError::Api`].
///
/// `fallback_reset` is used as the wait for limit errors that carry no
/// interval of their own.
///
/// # Errors
///
/// Returns the classified [`MondayError`] for every non-success response.
pub fn classify(response: &TransportResponse, fallback_reset: Duration) -> Result<Value, MondayError> {
    let body = &response.body;
    let entries = collect_entries(body);

    if response.is_ok() && entries.is_empty() {
        match body.get("data") {
            Some(data) if !data.is_null() => return Ok(data.clone()),
            _ => {}
        }
    }

    let complexity = matching(&entries, ErrorEntry::is_complexity);
    if !complexity.is_empty() {
        return Err(RateLimitError {
            kind: LimitKind::Complexity,
            reset_in: reset_in(&complexity, response, fallback_reset),
            payload: body.clone(),
        }
        .into());
    }

    let rate = matching(&entries, ErrorEntry::is_rate_limit);
    if response.code == 429 || !rate.is_empty() {
        return Err(RateLimitError {
            kind: LimitKind::Mutation,
            reset_in: reset_in(&rate, response, fallback_reset),
            payload: body.clone(),
        }
        .into());
    }

    if let Some(entry) = entries.iter().find(|entry| entry.is_query_format()) {
        return Err(QueryFormatError {
            message: entry.message.clone(),
            payload: body.clone(),
        }
        .into());
    }

    let mut message = joined_messages(&entries);
    if message.is_empty() {
        message = match body.get("raw_body").and_then(Value::as_str) {
            Some(raw) => raw.chars().take(200).collect(),
            None if response.is_ok() => "response contained no data".to_string(),
            None => "request failed".to_string(),
        };
    }

    Err(ApiError {
        status: response.code,
        message,
        error_code: entries.iter().find_map(|entry| entry.code.clone()),
        payload: body.clone(),
        request_id: response.request_id().map(String::from),
    }
    .into())
}
