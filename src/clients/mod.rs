//! Request execution core for the Trendyol API.
//!
//! Every service call goes through this layer. It builds the HTTP request,
//! authenticates it, waits for rate-limit admission, retries transient
//! failures, and normalizes error responses.
//!
//! # Overview
//!
//! - [`HttpClient`]: the request executor
//! - [`HttpRequest`]: a request descriptor (method, resolved path, query, body)
//! - [`HttpResponse`]: status, headers and raw body bytes
//! - [`FromResponse`]: how a body becomes a result ([`Json`], [`RawBody`], `()`)
//! - [`RateLimiter`]: token bucket shared by all requests of a client
//! - [`ApiError`]: a structured Trendyol error response
//! - [`HttpError`]: everything a request can fail with
//!
//! # Retry Behavior
//!
//! - **Network errors, 429 and 5xx**: retried with exponential backoff
//!   (`base_delay`, then `2 * base_delay`, ...)
//! - **Other 4xx**: returned immediately
//! - **Decode errors**: returned after the retry loop, never retried
//!
//! When every attempt fails, the last error is wrapped in
//! [`MaxRetriesExceededError`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod rate_limiter;

pub use errors::{
    ApiError, ApiErrorItem, HttpError, InvalidHttpRequestError, MaxRetriesExceededError,
};
pub use http_client::{deadline_token, HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{FromResponse, HttpResponse, Json, RawBody};
pub use rate_limiter::{RateLimiter, POLL_INTERVAL};
