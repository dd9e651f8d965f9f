//! Trendyol API environment presets.
//!
//! This module provides the [`Environment`] enum for choosing between the
//! production gateway and the sandbox (stage) gateway.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Production API gateway.
pub const PRODUCTION_BASE_URL: &str = "https://apigw.trendyol.com";

/// Sandbox (stage) API gateway.
pub const SANDBOX_BASE_URL: &str = "https://stageapigw.trendyol.com";

/// Trendyol API environment.
///
/// # Example
///
/// ```rust
/// use trendyol_api::Environment;
///
/// let env: Environment = "sandbox".parse().unwrap();
/// assert_eq!(env, Environment::Sandbox);
/// assert_eq!(env.base_url(), "https://stageapigw.trendyol.com");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Live marketplace.
    #[default]
    Production,
    /// Stage gateway used for integration testing.
    Sandbox,
}

impl Environment {
    /// Returns the preset base URL for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Sandbox => SANDBOX_BASE_URL,
        }
    }

    /// Returns `true` for the sandbox environment.
    #[must_use]
    pub const fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }

    /// Maps the sandbox flag used throughout the Trendyol documentation.
    #[must_use]
    pub const fn from_sandbox_flag(is_sandbox: bool) -> Self {
        if is_sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Sandbox => f.write_str("sandbox"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "sandbox" | "stage" => Ok(Self::Sandbox),
            _ => Err(ConfigError::InvalidEnvironment {
                name: s.to_string(),
            }),
        }
    }
}
