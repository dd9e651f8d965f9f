//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Trendyol seller (supplier) ID.
///
/// The seller ID is substituted into most endpoint paths and forms the
/// default user agent.
///
/// # Example
///
/// ```rust
/// use trendyol_api::SellerId;
///
/// let seller = SellerId::new("123456").unwrap();
/// assert_eq!(seller.as_ref(), "123456");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SellerId(String);

impl SellerId {
    /// Creates a new validated seller ID.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySellerId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ConfigError::EmptySellerId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for SellerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for SellerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SellerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated Trendyol API key.
///
/// # Example
///
/// ```rust
/// use trendyol_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Trendyol API secret.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ApiSecret(*****)` instead of the actual secret.
///
/// # Example
///
/// ```rust
/// use trendyol_api::ApiSecret;
///
/// let secret = ApiSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ApiSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecret(String);

impl ApiSecret {
    /// Creates a new validated API secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyApiSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ApiSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret(*****)")
    }
}

/// A validated absolute base URL for API requests.
///
/// Only `http` and `https` schemes are accepted. A trailing slash is
/// dropped so that resolved endpoint paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use trendyol_api::BaseUrl;
///
/// let url = BaseUrl::new("https://apigw.trendyol.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://apigw.trendyol.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse or
    /// does not use an http(s) scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|_| ConfigError::InvalidBaseUrl { url: url.clone() })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seller_id_rejects_empty_string() {
        assert!(matches!(SellerId::new(""), Err(ConfigError::EmptySellerId)));
        assert!(matches!(SellerId::new("   "), Err(ConfigError::EmptySellerId)));
    }

    #[test]
    fn test_seller_id_trims_whitespace() {
        let seller = SellerId::new(" 123456 ").unwrap();
        assert_eq!(seller.as_ref(), "123456");
        assert_eq!(seller.to_string(), "123456");
    }

    #[test]
    fn test_seller_id_serde_round_trip() {
        let seller = SellerId::new("987").unwrap();
        let json = serde_json::to_string(&seller).unwrap();
        assert_eq!(json, r#""987""#);

        let invalid: Result<SellerId, _> = serde_json::from_str(r#""""#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_api_key_rejects_empty_string() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_secret_rejects_empty_string() {
        assert!(matches!(ApiSecret::new(""), Err(ConfigError::EmptyApiSecret)));
    }

    #[test]
    fn test_api_secret_masks_value_in_debug() {
        let secret = ApiSecret::new("super-secret").unwrap();
        assert_eq!(format!("{secret:?}"), "ApiSecret(*****)");
        assert_eq!(secret.as_ref(), "super-secret");
    }

    #[test]
    fn test_base_url_accepts_https_and_strips_trailing_slash() {
        let url = BaseUrl::new("https://stageapigw.trendyol.com/").unwrap();
        assert_eq!(url.as_ref(), "https://stageapigw.trendyol.com");
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let url = BaseUrl::new("http://127.0.0.1:8080/proxy").unwrap();
        assert_eq!(url.as_ref(), "http://127.0.0.1:8080/proxy");
    }

    #[test]
    fn test_base_url_rejects_invalid_values() {
        for bad in ["", "apigw.trendyol.com", "ftp://apigw.trendyol.com", "https://"] {
            assert!(
                matches!(BaseUrl::new(bad), Err(ConfigError::InvalidBaseUrl { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
