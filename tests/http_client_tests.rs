//! Integration tests for the request executor.
//!
//! These tests run the HTTP client against a local mock gateway and verify
//! authentication headers, URL building, retry and backoff behavior, error
//! normalization and cancellation.

use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use trendyol_api::clients::deadline_token;
use trendyol_api::{
    ApiKey, ApiSecret, BaseUrl, HttpClient, HttpError, HttpMethod, HttpRequest, RetryPolicy,
    SellerId, TrendyolConfig,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates an HTTP client pointed at the mock server.
fn create_client(server: &MockServer, retry_policy: RetryPolicy) -> HttpClient {
    let config = TrendyolConfig::builder()
        .seller_id(SellerId::new("123456").unwrap())
        .api_key(ApiKey::new("key").unwrap())
        .api_secret(ApiSecret::new("secret").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .retry_policy(retry_policy)
        .requests_per_minute(600)
        .build()
        .unwrap();
    HttpClient::new(&config).unwrap()
}

fn fast_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::from_millis(10))
}

// ============================================================================
// Headers and URL building
// ============================================================================

#[tokio::test]
async fn test_sends_basic_auth_and_seller_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/integration/product/brands"))
        .and(header("Authorization", "Basic a2V5OnNlY3JldA=="))
        .and(header("User-Agent", "123456 - SelfIntegration"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "brands": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, fast_retries(0));
    let request = HttpRequest::builder(HttpMethod::Get, "/integration/product/brands").build();

    let response = client
        .execute(&request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.json::<serde_json::Value>().unwrap(), json!({ "brands": [] }));
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/integration/product/sellers/123456/products"))
        .and(query_param("barcode", "A B&C"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, fast_retries(0));
    let request = HttpRequest::builder(
        HttpMethod::Get,
        "/integration/product/sellers/123456/products",
    )
    .query_param("barcode", "A B&C")
    .query_param("page", 0)
    .build();

    client
        .request_empty(&request, &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_json_body_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/integration/sellers/123456/seller-invoice-links"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "shipmentPackageId": 1, "invoiceLink": "https://x" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, fast_retries(0));
    let request = HttpRequest::builder(
        HttpMethod::Post,
        "/integration/sellers/123456/seller-invoice-links",
    )
    .body(json!({ "shipmentPackageId": 1, "invoiceLink": "https://x" }))
    .build();

    client
        .request_empty(&request, &CancellationToken::new())
        .await
        .unwrap();
}

// ============================================================================
// Retry and backoff
// ============================================================================

#[tokio::test]
async fn test_server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, fast_retries(3));
    let request = HttpRequest::builder(HttpMethod::Get, "/anything").build();

    let body: serde_json::Value = client
        .request_json(&request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(body, json!({ "ok": true }));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_too_many_requests_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = create_client(&server, fast_retries(3));
    let request = HttpRequest::builder(HttpMethod::Get, "/anything").build();

    client
        .request_empty(&request, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "NOT_FOUND",
            "message": "shipment package not found",
            "errors": [{ "code": "PACKAGE_NOT_FOUND", "message": "no package 42" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, fast_retries(3));
    let request = HttpRequest::builder(HttpMethod::Get, "/anything").build();

    let error = client
        .execute(&request, &CancellationToken::new())
        .await
        .unwrap_err();

    let HttpError::Api(api) = &error else {
        panic!("expected an API error, got {error:?}");
    };
    assert_eq!(api.status_code, 404);
    assert_eq!(api.status.as_deref(), Some("NOT_FOUND"));
    assert_eq!(api.errors[0].code, "PACKAGE_NOT_FOUND");
    assert_eq!(
        error.to_string(),
        "Trendyol API error (404): PACKAGE_NOT_FOUND: no package 42"
    );
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_exhausted_retries_report_attempts_and_last_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(3)
        .mount(&server)
        .await;

    let client = create_client(&server, fast_retries(2));
    let request = HttpRequest::builder(HttpMethod::Get, "/anything").build();

    let error = client
        .execute(&request, &CancellationToken::new())
        .await
        .unwrap_err();

    let HttpError::MaxRetries(exhausted) = &error else {
        panic!("expected retry exhaustion, got {error:?}");
    };
    assert_eq!(exhausted.attempts, 3);
    assert_eq!(error.status_code(), Some(500));
    assert_eq!(error.api_error().unwrap().message, "upstream exploded");
    assert!(error.to_string().starts_with("request failed after 3 attempts"));
}

#[tokio::test]
async fn test_connection_failures_are_retried() {
    // Bind and release a port so nothing is listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = TrendyolConfig::builder()
        .seller_id(SellerId::new("123456").unwrap())
        .api_key(ApiKey::new("key").unwrap())
        .api_secret(ApiSecret::new("secret").unwrap())
        .base_url(BaseUrl::new(format!("http://127.0.0.1:{port}")).unwrap())
        .retry_policy(fast_retries(2))
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();
    let request = HttpRequest::builder(HttpMethod::Get, "/anything").build();

    let error = client
        .execute(&request, &CancellationToken::new())
        .await
        .unwrap_err();

    let HttpError::MaxRetries(exhausted) = &error else {
        panic!("expected retry exhaustion, got {error:?}");
    };
    assert_eq!(exhausted.attempts, 3);
    assert!(matches!(*exhausted.last, HttpError::Network(_)));
    assert_eq!(error.status_code(), None);
}

#[tokio::test]
async fn test_no_retries_makes_a_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, RetryPolicy::no_retries());
    let request = HttpRequest::builder(HttpMethod::Get, "/anything").build();

    let error = client
        .execute(&request, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(error, HttpError::MaxRetries(ref e) if e.attempts == 1));
}

#[tokio::test]
async fn test_decode_failure_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, fast_retries(3));
    let request = HttpRequest::builder(HttpMethod::Get, "/anything").build();

    let error = client
        .request_json::<serde_json::Value>(&request, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(error, HttpError::Decode(_)));
}

#[tokio::test]
async fn test_raw_body_is_returned_verbatim() {
    let server = MockServer::start().await;
    let label = b"^XA^FO50,50^FDLABEL^FS^XZ".to_vec();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(label.clone()))
        .mount(&server)
        .await;

    let client = create_client(&server, fast_retries(0));
    let request = HttpRequest::builder(HttpMethod::Get, "/label").build();

    let body = client
        .request_raw(&request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(body, label);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_cancellation_during_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = create_client(&server, RetryPolicy::new(3, Duration::from_secs(30)));
    let request = HttpRequest::builder(HttpMethod::Get, "/anything").build();

    let started = std::time::Instant::now();
    let error = client
        .execute(&request, &deadline_token(Duration::from_millis(200)))
        .await
        .unwrap_err();

    assert!(error.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_cancelled_token_stops_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server, fast_retries(0));
    // Drain the bucket so the call has to wait for a token.
    let spare = CancellationToken::new();
    for _ in 0..client.rate_limiter().capacity() {
        client.rate_limiter().acquire(&spare).await.unwrap();
    }

    let token = CancellationToken::new();
    token.cancel();
    let request = HttpRequest::builder(HttpMethod::Get, "/anything").build();

    let error = client.execute(&request, &token).await.unwrap_err();
    assert!(matches!(error, HttpError::Cancelled));
}

#[tokio::test]
async fn test_slow_response_is_cancelled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = create_client(&server, fast_retries(0));
    let request = HttpRequest::builder(HttpMethod::Get, "/slow").build();

    let error = client
        .execute(&request, &deadline_token(Duration::from_millis(100)))
        .await
        .unwrap_err();

    assert!(error.is_cancelled());
}
