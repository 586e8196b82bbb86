//! Configuration types for the monday.com API client.
//!
//! # Overview
//!
//! - [`MondayConfig`]: All settings the client and its retry engine consume
//! - [`MondayConfigBuilder`]: A builder for constructing [`MondayConfig`]
//! - [`ApiKey`]: A validated API token with masked debug output
//! - [`ApiUrl`]: A validated endpoint URL
//! - [`ApiVersion`]: The monday.com API version to request
//!
//! # Example
//!
//! ```rust
//! use monday_api::{ApiKey, ApiVersion, MondayConfig};
//! use std::time::Duration;
//!
//! let config = MondayConfig::builder()
//!     .api_key(ApiKey::new("my-token").unwrap())
//!     .api_version(ApiVersion::V2024_10)
//!     .timeout(Duration::from_secs(30))
//!     .max_retries(2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_retries(), 2);
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiKey, ApiUrl};
pub use version::ApiVersion;

use std::time::Duration;

use crate::error::ConfigError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 4;

/// Default wait when a limit error carries no reset interval, in seconds.
pub const DEFAULT_RATE_LIMIT_SECONDS: u64 = 60;

/// Default first backoff step for generic failures.
pub const DEFAULT_BASE_BACKOFF: Duration = Duration::from_secs(1);

/// Configuration for the monday.com API client.
///
/// The retry settings are consumed as plain parameters by the retry engine;
/// nothing here is re-derived at request time.
///
/// # Thread Safety
///
/// `MondayConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct MondayConfig {
    api_key: ApiKey,
    base_url: ApiUrl,
    api_version: Option<ApiVersion>,
    timeout: Duration,
    max_retries: u32,
    rate_limit_seconds: u64,
    base_backoff: Duration,
    user_agent_prefix: Option<String>,
}

impl MondayConfig {
    /// Creates a new builder for constructing a `MondayConfig`.
    #[must_use]
    pub fn builder() -> MondayConfigBuilder {
        MondayConfigBuilder::new()
    }

    /// Builds a configuration from `MONDAY_*` environment variables.
    ///
    /// See [`MondayConfig::from_lookup`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `MONDAY_API_KEY` is missing or any value
    /// fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Recognized variables:
    ///
    /// - `MONDAY_API_KEY` (required)
    /// - `MONDAY_API_URL`
    /// - `MONDAY_API_VERSION`
    /// - `MONDAY_TIMEOUT_SECS`
    /// - `MONDAY_MAX_RETRIES`
    /// - `MONDAY_RATE_LIMIT_SECONDS`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the key is missing or a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("MONDAY_API_KEY").ok_or(ConfigError::MissingRequiredField {
            field: "MONDAY_API_KEY",
        })?;
        let mut builder = Self::builder().api_key(ApiKey::new(api_key)?);

        if let Some(url) = lookup("MONDAY_API_URL") {
            builder = builder.base_url(ApiUrl::new(url)?);
        }
        if let Some(version) = lookup("MONDAY_API_VERSION") {
            builder = builder.api_version(version.parse()?);
        }
        if let Some(secs) = parse_env(&lookup, "MONDAY_TIMEOUT_SECS")? {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = parse_env(&lookup, "MONDAY_MAX_RETRIES")? {
            builder = builder.max_retries(retries);
        }
        if let Some(secs) = parse_env(&lookup, "MONDAY_RATE_LIMIT_SECONDS")? {
            builder = builder.rate_limit_seconds(secs);
        }

        builder.build()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// Returns the API version, if one is pinned.
    #[must_use]
    pub const fn api_version(&self) -> Option<&ApiVersion> {
        self.api_version.as_ref()
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the number of retries allowed after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the fallback wait for limit errors without a reset interval.
    #[must_use]
    pub const fn rate_limit_seconds(&self) -> u64 {
        self.rate_limit_seconds
    }

    /// Returns the first backoff step for generic failures.
    #[must_use]
    pub const fn base_backoff(&self) -> Duration {
        self.base_backoff
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

fn parse_env<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnvValue { name, value })
        })
        .transpose()
}

// Verify MondayConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MondayConfig>();
};

/// Builder for constructing [`MondayConfig`] instances.
///
/// Only `api_key` is required.
///
/// # Defaults
///
/// - `base_url`: `https://api.monday.com/v2`
/// - `api_version`: `None` (the account default)
/// - `timeout`: 60 seconds
/// - `max_retries`: 4
/// - `rate_limit_seconds`: 60
/// - `base_backoff`: 1 second
#[derive(Debug, Default)]
pub struct MondayConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<ApiUrl>,
    api_version: Option<ApiVersion>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    rate_limit_seconds: Option<u64>,
    base_backoff: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl MondayConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the endpoint URL.
    #[must_use]
    pub fn base_url(mut self, url: ApiUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Pins the API version sent in the `API-Version` header.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how many times a failed call is retried.
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the fallback wait for limit errors without a reset interval.
    #[must_use]
    pub const fn rate_limit_seconds(mut self, seconds: u64) -> Self {
        self.rate_limit_seconds = Some(seconds);
        self
    }

    /// Sets the first backoff step for generic failures.
    #[must_use]
    pub const fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = Some(backoff);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`MondayConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set.
    pub fn build(self) -> Result<MondayConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(MondayConfig {
            api_key,
            base_url: self.base_url.unwrap_or_default(),
            api_version: self.api_version,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            rate_limit_seconds: self
                .rate_limit_seconds
                .unwrap_or(DEFAULT_RATE_LIMIT_SECONDS),
            base_backoff: self.base_backoff.unwrap_or(DEFAULT_BASE_BACKOFF),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
