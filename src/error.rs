//! Error types for the Trendyol API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use trendyol_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Seller ID cannot be empty.
    #[error("Seller ID cannot be empty. Please provide your Trendyol seller (supplier) ID.")]
    EmptySellerId,

    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Trendyol API key.")]
    EmptyApiKey,

    /// API secret cannot be empty.
    #[error("API secret cannot be empty. Please provide a valid Trendyol API secret.")]
    EmptyApiSecret,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an absolute http(s) URL (e.g., 'https://apigw.trendyol.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Environment name is not recognized.
    #[error("Invalid environment '{name}'. Expected 'production' or 'sandbox'.")]
    InvalidEnvironment {
        /// The unrecognized environment name.
        name: String,
    },

    /// Rate limit must admit at least one request per minute.
    #[error("Invalid rate limit {requests_per_minute}. Requests per minute must be greater than zero.")]
    InvalidRateLimit {
        /// The rejected requests-per-minute value.
        requests_per_minute: u32,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A configured value cannot be sent as an HTTP header.
    #[error("Invalid value for header '{header}'. Header values must be visible ASCII.")]
    InvalidHeaderValue {
        /// The header that could not be built.
        header: &'static str,
    },

    /// The underlying HTTP transport could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClientInit {
        /// Why the transport could not be built.
        reason: String,
    },
}
