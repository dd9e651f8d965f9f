//! Error type for Trendyol service operations.
//!
//! Service methods return [`ResourceError`], which wraps the request-level
//! [`HttpError`] and adds lookup failures that are not HTTP errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use trendyol_api::rest::ResourceError;
//!
//! match client.products().get_by_barcode("8680000000000").await {
//!     Ok(product) => println!("Found: {}", product.title),
//!     Err(ResourceError::NotFound { resource, key }) => {
//!         println!("{resource} {key} not found");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{ApiError, HttpError};

/// Error type for service operations.
///
/// # Example
///
/// ```rust
/// use trendyol_api::rest::ResourceError;
///
/// let error = ResourceError::NotFound {
///     resource: "Product",
///     key: "barcode 123".to_string(),
/// };
/// assert!(error.to_string().contains("Product"));
/// assert!(error.is_not_found());
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A lookup returned no match.
    #[error("{resource} not found: {key}")]
    NotFound {
        /// The type name of the resource (e.g., "Product").
        resource: &'static str,
        /// What was looked up.
        key: String,
    },

    /// The request itself failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl From<ApiError> for ResourceError {
    fn from(error: ApiError) -> Self {
        Self::Http(HttpError::Api(error))
    }
}

impl ResourceError {
    /// Returns `true` for a lookup miss or an HTTP 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Http(e) => e.status_code() == Some(404),
        }
    }

    /// Returns the HTTP status of the underlying API error, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => None,
            Self::Http(e) => e.status_code(),
        }
    }

    /// Returns the structured API error, if any.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::NotFound { .. } => None,
            Self::Http(e) => e.api_error(),
        }
    }

    /// Returns `true` if the operation was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Http(HttpError::Cancelled))
    }
}
