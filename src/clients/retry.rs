//! Bounded retry with backoff.
//!
//! # Retry Behavior
//!
//! - **Complexity / mutation limit**: sleeps exactly the server's reset
//!   interval, then resends
//! - **Generic API errors and transport failures** (including timeouts):
//!   sleeps `min(base_backoff * 2^n, max_backoff)`, then resends
//! - **Query format, decode, input and invalid-request errors**: returned
//!   immediately
//!
//! A call sends at most `max_retries + 1` times. When the budget is spent
//! the last classified error is returned. Sleeps use `tokio::time::sleep`,
//! so dropping the future cancels the call at any point.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::clients::errors::MondayError;
use crate::config::MondayConfig;

/// Upper bound for a single generic backoff step.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Retry parameters, taken verbatim from [`MondayConfig`].
///
/// # Example
///
/// ```rust
/// use monday_api::clients::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy {
///     max_retries: 4,
///     base_backoff: Duration::from_secs(1),
///     max_backoff: Duration::from_secs(5),
///     fallback_reset: Duration::from_secs(60),
/// };
///
/// assert_eq!(policy.backoff_for(0), Duration::from_secs(1));
/// assert_eq!(policy.backoff_for(2), Duration::from_secs(4));
/// assert_eq!(policy.backoff_for(3), Duration::from_secs(5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first send.
    pub max_retries: u32,
    /// First backoff step for generic failures.
    pub base_backoff: Duration,
    /// Cap for generic backoff steps.
    pub max_backoff: Duration,
    /// Wait used for limit errors that carry no reset interval.
    pub fallback_reset: Duration,
}

impl RetryPolicy {
    /// Builds the policy from client configuration.
    #[must_use]
    pub fn from_config(config: &MondayConfig) -> Self {
        Self {
            max_retries: config.max_retries(),
            base_backoff: config.base_backoff(),
            max_backoff: DEFAULT_MAX_BACKOFF.max(config.base_backoff()),
            fallback_reset: Duration::from_secs(config.rate_limit_seconds()),
        }
    }

    /// Returns the generic backoff after `retries` previous retries.
    ///
    /// Non-decreasing in `retries` and never above `max_backoff`.
    #[must_use]
    pub fn backoff_for(&self, retries: u32) -> Duration {
        let factor = 1_u32.checked_shl(retries).unwrap_or(u32::MAX);
        self.base_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Per-call retry bookkeeping. Created for one logical call, never shared.
#[derive(Debug)]
struct RetryState {
    attempt: u32,
    max_retries: u32,
    next_wait: Duration,
}

impl RetryState {
    const fn new(max_retries: u32) -> Self {
        Self {
            attempt: 0,
            max_retries,
            next_wait: Duration::ZERO,
        }
    }

    const fn can_retry(&self) -> bool {
        self.attempt < self.max_retries
    }

    fn record(&mut self, wait: Duration) {
        self.attempt += 1;
        self.next_wait = wait;
    }
}

/// Runs `send` until it succeeds, fails permanently, or the budget is spent.
///
/// `send` performs one transport round trip plus classification. It is
/// called at most `policy.max_retries + 1` times.
pub(crate) async fn execute_with_retry<F, Fut>(
    policy: &RetryPolicy,
    mut send: F,
) -> Result<Value, MondayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Value, MondayError>>,
{
    let mut state = RetryState::new(policy.max_retries);

    loop {
        let error = match send().await {
            Ok(data) => return Ok(data),
            Err(error) => error,
        };

        if !error.is_retryable() {
            return Err(error);
        }

        if !state.can_retry() {
            tracing::error!(
                attempts = state.attempt + 1,
                error = %error,
                "Max retries reached"
            );
            return Err(error);
        }

        let wait = error
            .reset_in()
            .unwrap_or_else(|| policy.backoff_for(state.attempt));
        state.record(wait);

        tracing::warn!(
            attempt = state.attempt,
            max_retries = state.max_retries,
            delay_secs = state.next_wait.as_secs_f64(),
            error = %error,
            "Request failed, retrying"
        );

        tokio::time::sleep(state.next_wait).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::errors::{ApiError, LimitKind, QueryFormatError, RateLimitError};
    use crate::config::ApiKey;
    use serde_json::json;
    use std::cell::Cell;

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(8),
            fallback_reset: Duration::from_secs(60),
        }
    }

    fn api_error() -> MondayError {
        ApiError {
            status: 500,
            message: "Internal Server Error".to_string(),
            error_code: None,
            payload: json!({}),
            request_id: None,
        }
        .into()
    }

    #[test]
    fn test_backoff_is_capped_and_non_decreasing() {
        let policy = policy(10);
        let steps: Vec<Duration> = (0..40).map(|n| policy.backoff_for(n)).collect();
        assert!(steps.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(steps[0], Duration::from_secs(1));
        assert_eq!(steps[3], Duration::from_secs(8));
        assert_eq!(steps[39], Duration::from_secs(8));
    }

    #[test]
    fn test_policy_from_config() {
        let config = MondayConfig::builder()
            .api_key(ApiKey::new("t").unwrap())
            .max_retries(2)
            .rate_limit_seconds(15)
            .build()
            .unwrap();
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.fallback_reset, Duration::from_secs(15));
        assert_eq!(policy.base_backoff, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generic_errors_back_off_exponentially() {
        let sends = Cell::new(0_u32);
        let start = tokio::time::Instant::now();

        let result = execute_with_retry(&policy(3), || {
            sends.set(sends.get() + 1);
            async { Err(api_error()) }
        })
        .await;

        assert!(matches!(result, Err(MondayError::Api(_))));
        assert_eq!(sends.get(), 4);
        // 1 + 2 + 4
        assert_eq!(start.elapsed(), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_limit_errors_sleep_reset_in() {
        let sends = Cell::new(0_u32);
        let start = tokio::time::Instant::now();

        let result = execute_with_retry(&policy(5), || {
            sends.set(sends.get() + 1);
            let n = sends.get();
            async move {
                if n < 3 {
                    Err(RateLimitError {
                        kind: LimitKind::Mutation,
                        reset_in: Duration::from_secs(10),
                        payload: json!({}),
                    }
                    .into())
                } else {
                    Ok(json!({"ok": true}))
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), json!({"ok": true}));
        assert_eq!(sends.get(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_format_is_not_retried() {
        let sends = Cell::new(0_u32);

        let result = execute_with_retry(&policy(5), || {
            sends.set(sends.get() + 1);
            async {
                Err(QueryFormatError {
                    message: "Parse error on \"}\"".to_string(),
                    payload: json!({}),
                }
                .into())
            }
        })
        .await;

        assert!(matches!(result, Err(MondayError::QueryFormat(_))));
        assert_eq!(sends.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_sends_once() {
        let sends = Cell::new(0_u32);
        let result = execute_with_retry(&policy(0), || {
            sends.set(sends.get() + 1);
            async { Err(api_error()) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(sends.get(), 1);
    }
}
