//! Request executor for the Trendyol API.
//!
//! This module provides the [`HttpClient`] type, which sends [`HttpRequest`]s
//! with authentication, rate limiting and exponential backoff.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use tokio_util::sync::CancellationToken;

use crate::clients::errors::{
    ApiError, HttpError, InvalidHttpRequestError, MaxRetriesExceededError,
};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::{FromResponse, HttpResponse, Json, RawBody};
use crate::clients::rate_limiter::RateLimiter;
use crate::config::{BaseUrl, RetryPolicy, TrendyolConfig};
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

const JSON_CONTENT_TYPE: &str = "application/json";

/// Returns a token that cancels itself once `timeout` has elapsed.
///
/// Cancelling the returned token early also stops the timer.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use trendyol_api::clients::deadline_token;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let token = deadline_token(Duration::from_secs(5));
/// assert!(!token.is_cancelled());
/// # }
/// ```
#[must_use]
pub fn deadline_token(timeout: Duration) -> CancellationToken {
    let token = CancellationToken::new();
    let timer = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            () = timer.cancelled() => {}
            () = tokio::time::sleep(timeout) => timer.cancel(),
        }
    });
    token
}

/// HTTP client for making requests to the Trendyol API.
///
/// The client handles:
/// - URL construction from the (mutable) base URL and a resolved path
/// - Basic authentication, `User-Agent`, and JSON content negotiation headers
/// - One rate-limiter token per request
/// - Exponential backoff for network errors, 429 and 5xx responses
/// - Cancellation at every wait (limiter, backoff sleep, network I/O)
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use tokio_util::sync::CancellationToken;
/// use trendyol_api::clients::{HttpClient, HttpMethod, HttpRequest, Json};
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "/integration/product/brands").build();
///
/// let Json(brands): Json<serde_json::Value> =
///     client.request(&request, &CancellationToken::new()).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: RwLock<String>,
    authorization: HeaderValue,
    user_agent: HeaderValue,
    retry_policy: RetryPolicy,
    rate_limiter: RateLimiter,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new executor from a client configuration.
    ///
    /// Uses the configured `reqwest::Client` when one is supplied; otherwise
    /// builds one with rustls and the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the transport cannot be
    /// created, or [`ConfigError::InvalidHeaderValue`] if the user agent is
    /// not a valid header value.
    pub fn new(config: &TrendyolConfig) -> Result<Self, ConfigError> {
        let client = match config.http_client() {
            Some(client) => client.clone(),
            None => reqwest::Client::builder()
                .use_rustls_tls()
                .timeout(config.timeout())
                .build()
                .map_err(|e| ConfigError::HttpClientInit {
                    reason: e.to_string(),
                })?,
        };

        let mut authorization = HeaderValue::from_str(&basic_authorization(
            config.api_key().as_ref(),
            config.api_secret().as_ref(),
        ))
        .map_err(|_| ConfigError::InvalidHeaderValue {
            header: "Authorization",
        })?;
        authorization.set_sensitive(true);

        let user_agent = HeaderValue::from_str(&config.user_agent())
            .map_err(|_| ConfigError::InvalidHeaderValue {
                header: "User-Agent",
            })?;

        tracing::debug!(
            sdk_version = SDK_VERSION,
            base_url = config.base_url().as_ref(),
            requests_per_minute = config.requests_per_minute(),
            "creating Trendyol HTTP client"
        );

        Ok(Self {
            client,
            base_url: RwLock::new(config.base_url().as_ref().to_string()),
            authorization,
            user_agent,
            retry_policy: config.retry_policy(),
            rate_limiter: RateLimiter::new(config.requests_per_minute()),
        })
    }

    /// Returns the current base URL.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Points subsequent requests at a different base URL.
    pub fn set_base_url(&self, url: BaseUrl) {
        let mut base_url = self.base_url.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(
            from = base_url.as_str(),
            to = url.as_ref(),
            "changing Trendyol API base URL"
        );
        *base_url = url.as_ref().to_string();
    }

    /// Returns the `User-Agent` sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.to_str().unwrap_or_default()
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Returns the shared rate limiter.
    #[must_use]
    pub const fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Stops the rate limiter's refill task.
    pub fn close(&self) {
        self.rate_limiter.close();
    }

    /// Sends a request and returns the successful response.
    ///
    /// Takes one rate-limiter token, then makes up to
    /// [`RetryPolicy::max_attempts`] attempts. Network errors, 429 and 5xx
    /// responses are retried after `base_delay * 2^(attempt-2)`; any other
    /// failure returns immediately.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - The limiter wait, a backoff sleep or the transfer is cancelled (`Cancelled`)
    /// - The client was closed and no tokens remain (`RateLimiterClosed`)
    /// - A non-retryable status is received (`Api`)
    /// - All attempts fail with retryable errors (`MaxRetries`)
    pub async fn execute(
        &self,
        request: &HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, HttpError> {
        let extra_headers = extra_headers(request)?;
        self.rate_limiter.acquire(cancel).await?;

        let max_attempts = self.retry_policy.max_attempts();
        let mut attempt: u32 = 1;
        loop {
            if let Some(delay) = self.retry_policy.delay_before(attempt) {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return Err(HttpError::Cancelled),
                    () = tokio::time::sleep(delay) => {}
                }
            }

            tracing::debug!(
                method = %request.http_method,
                path = %request.path,
                attempt,
                max_attempts,
                "sending Trendyol API request"
            );

            let error = match self.send_once(request, &extra_headers, cancel).await {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };

            if !error.is_retryable() {
                return Err(error);
            }
            if attempt >= max_attempts {
                return Err(HttpError::MaxRetries(MaxRetriesExceededError {
                    attempts: attempt,
                    last: Box::new(error),
                }));
            }

            attempt += 1;
            tracing::warn!(
                method = %request.http_method,
                path = %request.path,
                error = %error,
                next_attempt = attempt,
                delay_ms = self
                    .retry_policy
                    .delay_before(attempt)
                    .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
                "Trendyol API request failed, retrying"
            );
        }
    }

    /// Sends a request and converts the response body with `T`.
    ///
    /// The body is decoded once, after the retry loop; a decode failure is
    /// never retried.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus
    /// [`HttpError::Decode`] when the body does not match `T`.
    pub async fn request<T: FromResponse>(
        &self,
        request: &HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<T, HttpError> {
        let response = self.execute(request, cancel).await?;
        T::from_body(response.body).map_err(HttpError::Decode)
    }

    /// Sends a request and decodes a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        request: &HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<T, HttpError> {
        self.request::<Json<T>>(request, cancel)
            .await
            .map(Json::into_inner)
    }

    /// Sends a request and returns the body bytes verbatim.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn request_raw(
        &self,
        request: &HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, HttpError> {
        self.request::<RawBody>(request, cancel)
            .await
            .map(RawBody::into_inner)
    }

    /// Sends a request and ignores the body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn request_empty(
        &self,
        request: &HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<(), HttpError> {
        self.request::<()>(request, cancel).await
    }

    async fn send_once(
        &self,
        request: &HttpRequest,
        extra_headers: &HeaderMap,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, HttpError> {
        let url = self.build_url(request)?;

        let mut builder = self
            .client
            .request(request.http_method.as_reqwest(), url)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(USER_AGENT, self.user_agent.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .headers(extra_headers.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let transfer = async {
            let response = builder.send().await?;
            let code = response.status().as_u16();
            let headers = HttpResponse::collect_headers(response.headers());
            let body = response.bytes().await?.to_vec();
            Ok::<_, HttpError>(HttpResponse::new(code, headers, body))
        };

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(HttpError::Cancelled),
            response = transfer => response?,
        };

        if response.is_ok() {
            Ok(response)
        } else {
            Err(ApiError::from_response(response.code, &response.body).into())
        }
    }

    /// Joins the base URL and the request path, then appends the query.
    fn build_url(&self, request: &HttpRequest) -> Result<reqwest::Url, HttpError> {
        let base = self.base_url();
        let mut url = reqwest::Url::parse(&base).map_err(|e| HttpError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;

        let path = format!("{}{}", url.path().trim_end_matches('/'), request.path);
        url.set_path(&path);

        if !request.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

/// Parses the request's extra headers, rejecting anything reqwest would refuse.
fn extra_headers(request: &HttpRequest) -> Result<HeaderMap, InvalidHttpRequestError> {
    let mut headers = HeaderMap::with_capacity(request.extra_headers.len());
    for (name, value) in &request.extra_headers {
        let invalid = || InvalidHttpRequestError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Builds the `Basic` authorization value for an API key pair.
fn basic_authorization(api_key: &str, api_secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{api_key}:{api_secret}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_request::HttpMethod;
    use crate::config::{ApiKey, ApiSecret, SellerId};

    fn create_test_config() -> TrendyolConfig {
        TrendyolConfig::builder()
            .seller_id(SellerId::new("123456").unwrap())
            .api_key(ApiKey::new("key").unwrap())
            .api_secret(ApiSecret::new("secret").unwrap())
            .base_url(BaseUrl::new("https://api.example.com/gateway").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_basic_authorization_encoding() {
        assert_eq!(basic_authorization("key", "secret"), "Basic a2V5OnNlY3JldA==");
    }

    #[test]
    fn test_new_uses_config_values() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        assert_eq!(client.base_url(), "https://api.example.com/gateway");
        assert_eq!(client.user_agent(), "123456 - SelfIntegration");
        assert_eq!(client.retry_policy(), RetryPolicy::default());
        assert_eq!(client.rate_limiter().capacity(), 60);
        assert!(client.authorization.is_sensitive());
    }

    #[test]
    fn test_new_rejects_unsendable_user_agent() {
        let config = TrendyolConfig::builder()
            .seller_id(SellerId::new("1").unwrap())
            .api_key(ApiKey::new("key").unwrap())
            .api_secret(ApiSecret::new("secret").unwrap())
            .user_agent("bad\nagent")
            .build()
            .unwrap();

        let result = HttpClient::new(&config);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidHeaderValue {
                header: "User-Agent"
            })
        ));
    }

    #[test]
    fn test_build_url_keeps_base_path_and_encodes_query() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        let request =
            HttpRequest::builder(HttpMethod::Get, "/integration/product/sellers/1/products")
                .query_param("barcode", "A B&C")
                .query_param("brandIds", 1)
                .query_param("brandIds", 2)
                .build();

        let url = client.build_url(&request).unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.example.com/gateway/integration/product/sellers/1/products?barcode=A+B%26C&brandIds=1&brandIds=2"
        );
    }

    #[test]
    fn test_build_url_escapes_reserved_path_characters() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/labels/a?b").build();

        let url = client.build_url(&request).unwrap();

        assert_eq!(url.path(), "/gateway/labels/a%3Fb");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_set_base_url_applies_to_next_request() {
        let client = HttpClient::new(&create_test_config()).unwrap();
        client.set_base_url(BaseUrl::new("http://localhost:8080/").unwrap());

        let request = HttpRequest::builder(HttpMethod::Get, "/x").build();
        let url = client.build_url(&request).unwrap();

        assert_eq!(url.as_str(), "http://localhost:8080/x");
    }

    #[test]
    fn test_sdk_version_matches_package() {
        assert_eq!(SDK_VERSION, env!("CARGO_PKG_VERSION"));
        assert!(!SDK_VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_header_name_fails_without_retry() {
        let config = TrendyolConfig::builder()
            .seller_id(SellerId::new("123456").unwrap())
            .api_key(ApiKey::new("key").unwrap())
            .api_secret(ApiSecret::new("secret").unwrap())
            .base_url(BaseUrl::new("http://127.0.0.1:9").unwrap())
            .retry_policy(RetryPolicy::new(3, Duration::from_secs(30)))
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/x")
            .header("bad header", "v")
            .build();

        let error = tokio::time::timeout(
            Duration::from_secs(5),
            client.execute(&request, &CancellationToken::new()),
        )
        .await
        .unwrap()
        .unwrap_err();

        assert!(matches!(
            error,
            HttpError::InvalidRequest(InvalidHttpRequestError::InvalidHeader { ref name })
                if name == "bad header"
        ));
        assert!(!error.is_retryable());
        assert_eq!(client.rate_limiter().available(), 60);
    }

    #[test]
    fn test_extra_headers_reject_control_characters_in_values() {
        let request = HttpRequest::builder(HttpMethod::Get, "/x")
            .header("X-Trace", "a\nb")
            .build();
        assert_eq!(
            extra_headers(&request),
            Err(InvalidHttpRequestError::InvalidHeader {
                name: "X-Trace".to_string()
            })
        );

        let request = HttpRequest::builder(HttpMethod::Get, "/x")
            .header("X-Trace", "abc")
            .build();
        let headers = extra_headers(&request).unwrap();
        assert_eq!(headers["x-trace"], "abc");
    }

    #[tokio::test]
    async fn test_deadline_token_fires() {
        let token = deadline_token(Duration::from_millis(10));
        tokio::time::timeout(Duration::from_secs(5), token.cancelled())
            .await
            .unwrap();
        assert!(token.is_cancelled());
    }
}
