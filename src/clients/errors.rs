//! HTTP-specific error types for the Trendyol API SDK.
//!
//! This module contains the structured API error produced from non-2xx
//! responses, and the unified [`HttpError`] returned by the request executor.
//!
//! # Error Taxonomy
//!
//! - **Transport** ([`HttpError::Network`], [`HttpError::InvalidUrl`]):
//!   connection, URL construction and body-read failures. Retried.
//! - **API** ([`HttpError::Api`]): any status >= 400, normalized into an
//!   [`ApiError`]. Retried only for 429 and 5xx.
//! - **Caller** ([`HttpError::InvalidRequest`], [`HttpError::Serialize`]):
//!   malformed endpoint template arguments or an unserializable body. Never
//!   retried and never sent.
//! - **Decode** ([`HttpError::Decode`]): a successful response whose body
//!   does not match the expected shape. Never retried.
//! - **Cancellation** ([`HttpError::Cancelled`], [`HttpError::RateLimiterClosed`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use tokio_util::sync::CancellationToken;
//! use trendyol_api::{HttpError, HttpMethod, HttpRequest};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/integration/product/brands").build();
//! let cancel = CancellationToken::new();
//!
//! match client.http_client().request_json::<serde_json::Value>(&request, &cancel).await {
//!     Ok(body) => println!("{body}"),
//!     Err(e) if e.status_code() == Some(401) => println!("check credentials"),
//!     Err(HttpError::Cancelled) => println!("gave up"),
//!     Err(e) => println!("failed: {e}"),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single entry in the `errors` array of a Trendyol error response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorItem {
    /// Machine-readable error code.
    #[serde(default)]
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub message: String,
    /// The request field the error refers to, when the API names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl fmt::Display for ApiErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(field) = self.field.as_deref().filter(|f| !f.is_empty()) {
            write!(f, " (field: {field})")?;
        }
        Ok(())
    }
}

/// Wire shape of a Trendyol error body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorItem>,
}

/// A normalized API failure response (status >= 400).
///
/// # Rendering
///
/// With sub-errors, each renders as `code: message` (plus ` (field: X)`)
/// joined by `; `. Without them the top-level message is used. Both forms
/// are prefixed with the status code.
///
/// # Example
///
/// ```rust
/// use trendyol_api::ApiError;
///
/// let error = ApiError::from_response(
///     400,
///     br#"{"errors":[{"code":"INVALID","message":"barcode is required","field":"barcode"}]}"#,
/// );
/// assert_eq!(
///     error.to_string(),
///     "Trendyol API error (400): INVALID: barcode is required (field: barcode)"
/// );
///
/// let error = ApiError::from_response(502, b"<html>Bad Gateway</html>");
/// assert_eq!(error.message, "<html>Bad Gateway</html>");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status_code: u16,
    /// The `status` text from the body, if present.
    pub status: Option<String>,
    /// Top-level message, or the raw body when it was not a Trendyol error document.
    pub message: String,
    /// Sub-errors in response order.
    pub errors: Vec<ApiErrorItem>,
}

impl ApiError {
    /// Normalizes a failure response into an `ApiError`.
    ///
    /// The HTTP status is authoritative even if the body carries its own
    /// `statusCode`. A body that is not JSON, or not shaped like a Trendyol
    /// error, becomes the message verbatim (lossily decoded as UTF-8). This
    /// never fails.
    #[must_use]
    pub fn from_response(status_code: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => Self {
                status_code,
                status: parsed.status,
                message: parsed.message.unwrap_or_default(),
                errors: parsed.errors,
            },
            Err(_) => Self {
                status_code,
                status: None,
                message: String::from_utf8_lossy(body).into_owned(),
                errors: Vec::new(),
            },
        }
    }

    /// Returns `true` when retrying the request could succeed (429 and non-4xx).
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.status_code == 429 || !(self.status_code >= 400 && self.status_code < 500)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Trendyol API error ({}): ", self.status_code)?;
        if self.errors.is_empty() {
            return f.write_str(&self.message);
        }
        for (i, item) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Error returned when every attempt of a retryable request failed.
#[derive(Debug, Error)]
#[error("request failed after {attempts} attempts: {last}")]
pub struct MaxRetriesExceededError {
    /// Total attempts made, including the first.
    pub attempts: u32,
    /// The error from the final attempt.
    #[source]
    pub last: Box<HttpError>,
}

/// Error returned when a request descriptor cannot be turned into a request.
///
/// These are programming errors on the caller's side: they are reported
/// before any network I/O and are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The endpoint template has more placeholders than arguments were given.
    #[error("Endpoint template '{template}' expects more than {given} argument(s).")]
    MissingArgument {
        /// The template being resolved.
        template: String,
        /// How many arguments were supplied.
        given: usize,
    },

    /// More arguments were given than the template has placeholders.
    #[error("Endpoint template '{template}' takes {expected} argument(s) but {given} were given.")]
    UnusedArguments {
        /// The template being resolved.
        template: String,
        /// Placeholder count.
        expected: usize,
        /// How many arguments were supplied.
        given: usize,
    },

    /// An argument does not match its placeholder's type.
    #[error("Argument {index} of endpoint template '{template}' must be {expected}.")]
    ArgumentType {
        /// The template being resolved.
        template: String,
        /// Zero-based position of the argument.
        index: usize,
        /// The placeholder's expected kind (`"a string"` or `"an integer"`).
        expected: &'static str,
    },

    /// An extra header name or value cannot be sent over HTTP.
    #[error("Invalid request header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The template contains a placeholder this client does not understand.
    #[error("Unsupported placeholder '%{verb}' in endpoint template '{template}'.")]
    UnsupportedPlaceholder {
        /// The template being resolved.
        template: String,
        /// The character following `%`.
        verb: char,
    },
}

/// Unified error type for request execution.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API answered with a status >= 400.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// All attempts of a retryable request failed.
    #[error(transparent)]
    MaxRetries(#[from] MaxRetriesExceededError),

    /// The request descriptor is invalid.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Connection, timeout or body-read failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The absolute request URL could not be built.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A successful response body did not match the expected shape.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The caller's cancellation signal fired.
    #[error("Request cancelled")]
    Cancelled,

    /// The client was closed and no rate-limit tokens remain.
    #[error("Rate limiter is closed; the client has been shut down")]
    RateLimiterClosed,
}

impl HttpError {
    /// Returns `true` when the executor may retry after this error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_retryable(),
            Self::Network(_) | Self::InvalidUrl { .. } => true,
            Self::MaxRetries(_)
            | Self::InvalidRequest(_)
            | Self::Serialize(_)
            | Self::Decode(_)
            | Self::Cancelled
            | Self::RateLimiterClosed => false,
        }
    }

    /// Returns the structured API error, looking through retry exhaustion.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::MaxRetries(e) => e.last.api_error(),
            _ => None,
        }
    }

    /// Returns the HTTP status of the API error, if there was one.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.api_error().map(|e| e.status_code)
    }

    /// Returns `true` if the request was abandoned because of cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
