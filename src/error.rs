//! Configuration error types for the monday.com API client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! settings are rejected before any request is sent.
//!
//! # Example
//!
//! ```rust
//! use monday_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`MondayConfig`](crate::MondayConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid monday.com API token.")]
    EmptyApiKey,

    /// API URL is invalid.
    #[error("Invalid API URL '{url}'. Expected an absolute http(s) URL such as 'https://api.monday.com/v2'.")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-10').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// An environment variable holds a value that cannot be parsed.
    #[error("Invalid value '{value}' for environment variable {name}.")]
    InvalidEnvValue {
        /// The variable name.
        name: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}
