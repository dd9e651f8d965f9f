//! # Trendyol API Rust SDK
//!
//! A Rust SDK for the Trendyol Marketplace seller integration API.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`TrendyolConfig`] and [`TrendyolConfigBuilder`]
//! - Validated newtypes for seller credentials and the gateway URL
//! - An endpoint registry with per-client path template overrides
//! - A shared token-bucket rate limiter (requests per minute)
//! - Async request execution with exponential backoff retries
//! - Normalized API errors with status code and item details
//! - Per-domain services: products, price and inventory, orders, claims,
//!   addresses, categories and brands, finance, common labels, geographic
//!   lookups, test orders and shipment providers
//!
//! ## Quick Start
//!
//! ```rust
//! use trendyol_api::{ApiKey, ApiSecret, SellerId, TrendyolConfig};
//!
//! let config = TrendyolConfig::builder()
//!     .seller_id(SellerId::new("123456").unwrap())
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_secret(ApiSecret::new("your-api-secret").unwrap())
//!     .sandbox(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.user_agent(), "123456 - SelfIntegration");
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use trendyol_api::{TrendyolClient, TrendyolConfig};
//! use trendyol_api::rest::resources::{PriceInventoryItem, ProductListOptions};
//!
//! let client = TrendyolClient::new(config)?;
//!
//! // Approved products, 100 per page
//! let options = ProductListOptions { approved: Some(true), ..Default::default() };
//! let page = client.products().list_with_options(0, 100, &options).await?;
//!
//! // Update stock and wait for the batch to be processed
//! let batch = client
//!     .price_inventory()
//!     .update(&[PriceInventoryItem {
//!         barcode: "8680000000001".to_string(),
//!         quantity: 25,
//!         sale_price: 199.9,
//!         list_price: 249.9,
//!     }])
//!     .await?;
//! let status = client
//!     .products()
//!     .wait_for_batch(&batch.batch_request_id, Duration::from_secs(5))
//!     .await?;
//! ```
//!
//! ## Error Handling
//!
//! Service methods return [`rest::ResourceError`]; the request layer returns
//! [`HttpError`]. API failures carry an [`ApiError`] with the HTTP status and
//! the error items Trendyol reported:
//!
//! ```rust,ignore
//! use trendyol_api::rest::ResourceError;
//!
//! match client.orders().update_tracking_number(42, "7330000000000").await {
//!     Ok(()) => {}
//!     Err(e) if e.status_code() == Some(400) => {
//!         for item in &e.api_error().unwrap().errors {
//!             eprintln!("{}: {}", item.code, item.message);
//!         }
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Cancellation
//!
//! Every request runs under a [`tokio_util::sync::CancellationToken`]. A
//! cancelled token aborts the rate limiter wait, a backoff sleep or the
//! transfer itself with [`HttpError::Cancelled`]. Use
//! [`clients::deadline_token`] for a per-call deadline.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration, endpoint overrides and the rate
//!   limiter belong to a client instance
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: built on Tokio

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use client::TrendyolClient;
pub use config::{
    ApiKey, ApiSecret, BaseUrl, Environment, RetryPolicy, SellerId, TrendyolConfig,
    TrendyolConfigBuilder,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, ApiErrorItem, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, InvalidHttpRequestError, MaxRetriesExceededError, RateLimiter,
};

// Re-export REST types
pub use rest::{EndpointRegistry, Page, PathArg, ResourceError};
