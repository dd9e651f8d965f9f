//! Configuration types for the Trendyol API SDK.
//!
//! This module provides the core configuration types used to initialize
//! a [`TrendyolClient`](crate::TrendyolClient).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`TrendyolConfig`]: The main configuration struct holding all SDK settings
//! - [`TrendyolConfigBuilder`]: A builder for constructing [`TrendyolConfig`] instances
//! - [`SellerId`], [`ApiKey`], [`ApiSecret`]: Validated credential newtypes
//! - [`BaseUrl`]: A validated absolute base URL
//! - [`Environment`]: Production or sandbox gateway preset
//! - [`RetryPolicy`]: Exponential backoff settings
//!
//! # Example
//!
//! ```rust
//! use trendyol_api::{ApiKey, ApiSecret, Environment, SellerId, TrendyolConfig};
//!
//! let config = TrendyolConfig::builder()
//!     .seller_id(SellerId::new("123456").unwrap())
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .api_secret(ApiSecret::new("my-secret").unwrap())
//!     .environment(Environment::Sandbox)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://stageapigw.trendyol.com");
//! ```

mod environment;
mod newtypes;
mod retry;

pub use environment::{Environment, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
pub use newtypes::{ApiKey, ApiSecret, BaseUrl, SellerId};
pub use retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES};

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigError;

/// Default outbound request budget.
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 60;

/// Default per-request transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Trendyol API SDK.
///
/// Credentials and endpoint overrides are fixed once the configuration is
/// built. Everything optional has a safe default.
///
/// # Thread Safety
///
/// `TrendyolConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct TrendyolConfig {
    seller_id: SellerId,
    api_key: ApiKey,
    api_secret: ApiSecret,
    environment: Environment,
    base_url: BaseUrl,
    user_agent: Option<String>,
    retry_policy: RetryPolicy,
    requests_per_minute: u32,
    timeout: Duration,
    http_client: Option<reqwest::Client>,
    endpoint_overrides: HashMap<String, String>,
}

impl TrendyolConfig {
    /// Creates a new builder for constructing a `TrendyolConfig`.
    #[must_use]
    pub fn builder() -> TrendyolConfigBuilder {
        TrendyolConfigBuilder::new()
    }

    /// Returns the seller ID.
    #[must_use]
    pub const fn seller_id(&self) -> &SellerId {
        &self.seller_id
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API secret.
    #[must_use]
    pub const fn api_secret(&self) -> &ApiSecret {
        &self.api_secret
    }

    /// Returns the environment preset.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the base URL requests are sent to.
    ///
    /// This is the environment preset unless an explicit base URL was set.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent header value.
    ///
    /// Defaults to `"<sellerId> - SelfIntegration"`, the format Trendyol
    /// expects from self-integrated sellers.
    #[must_use]
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("{} - SelfIntegration", self.seller_id))
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Returns the outbound request budget per minute.
    #[must_use]
    pub const fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }

    /// Returns the per-request transport timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the custom HTTP transport, if one was supplied.
    #[must_use]
    pub const fn http_client(&self) -> Option<&reqwest::Client> {
        self.http_client.as_ref()
    }

    /// Returns the endpoint template overrides.
    #[must_use]
    pub const fn endpoint_overrides(&self) -> &HashMap<String, String> {
        &self.endpoint_overrides
    }
}

// Verify TrendyolConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TrendyolConfig>();
};

/// Builder for constructing [`TrendyolConfig`] instances.
///
/// Required fields are `seller_id`, `api_key` and `api_secret`.
///
/// # Defaults
///
/// - `environment`: [`Environment::Production`]
/// - `base_url`: the environment preset
/// - `user_agent`: `"<sellerId> - SelfIntegration"`
/// - `retry_policy`: 3 retries, 1 second base delay
/// - `requests_per_minute`: 60
/// - `timeout`: 30 seconds
/// - `http_client`: a rustls-backed `reqwest::Client`
/// - `endpoint_overrides`: none
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use trendyol_api::{ApiKey, ApiSecret, RetryPolicy, SellerId, TrendyolConfig};
///
/// let config = TrendyolConfig::builder()
///     .seller_id(SellerId::new("123456").unwrap())
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret(ApiSecret::new("secret").unwrap())
///     .sandbox(true)
///     .retry_policy(RetryPolicy::new(5, Duration::from_millis(200)))
///     .requests_per_minute(120)
///     .user_agent("MyIntegration/1.0")
///     .endpoint_override("GetBrands", "/integration/product/brands/v2")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.requests_per_minute(), 120);
/// ```
#[derive(Debug, Default)]
pub struct TrendyolConfigBuilder {
    seller_id: Option<SellerId>,
    api_key: Option<ApiKey>,
    api_secret: Option<ApiSecret>,
    environment: Option<Environment>,
    base_url: Option<BaseUrl>,
    user_agent: Option<String>,
    retry_policy: Option<RetryPolicy>,
    requests_per_minute: Option<u32>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
    endpoint_overrides: HashMap<String, String>,
}

impl TrendyolConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seller ID (required).
    #[must_use]
    pub fn seller_id(mut self, seller_id: SellerId) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API secret (required).
    #[must_use]
    pub fn api_secret(mut self, secret: ApiSecret) -> Self {
        self.api_secret = Some(secret);
        self
    }

    /// Sets the environment preset.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Selects the sandbox (`true`) or production (`false`) gateway.
    #[must_use]
    pub const fn sandbox(self, is_sandbox: bool) -> Self {
        self.environment(Environment::from_sandbox_flag(is_sandbox))
    }

    /// Overrides the base URL chosen by the environment preset.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets a custom user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets the outbound request budget per minute.
    #[must_use]
    pub const fn requests_per_minute(mut self, requests_per_minute: u32) -> Self {
        self.requests_per_minute = Some(requests_per_minute);
        self
    }

    /// Sets the per-request transport timeout.
    ///
    /// Ignored when a custom [`http_client`](Self::http_client) is supplied.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Supplies a preconfigured HTTP transport.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Overrides a single endpoint template.
    #[must_use]
    pub fn endpoint_override(
        mut self,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.endpoint_overrides.insert(key.into(), template.into());
        self
    }

    /// Overrides several endpoint templates at once.
    ///
    /// Later calls win for keys that are overridden more than once.
    #[must_use]
    pub fn endpoint_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.endpoint_overrides
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Builds the [`TrendyolConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if a credential is
    /// missing, or [`ConfigError::InvalidRateLimit`] if the rate limit is zero.
    pub fn build(self) -> Result<TrendyolConfig, ConfigError> {
        let seller_id = self
            .seller_id
            .ok_or(ConfigError::MissingRequiredField { field: "seller_id" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let api_secret = self
            .api_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "api_secret",
            })?;

        let requests_per_minute = self
            .requests_per_minute
            .unwrap_or(DEFAULT_REQUESTS_PER_MINUTE);
        if requests_per_minute == 0 {
            return Err(ConfigError::InvalidRateLimit {
                requests_per_minute,
            });
        }

        let environment = self.environment.unwrap_or_default();
        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(environment.base_url())?,
        };

        Ok(TrendyolConfig {
            seller_id,
            api_key,
            api_secret,
            environment,
            base_url,
            user_agent: self.user_agent,
            retry_policy: self.retry_policy.unwrap_or_default(),
            requests_per_minute,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            http_client: self.http_client,
            endpoint_overrides: self.endpoint_overrides,
        })
    }
}
