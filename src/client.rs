//! The Trendyol client facade.
//!
//! [`TrendyolClient`] owns everything a seller integration shares across
//! calls: the configured seller id, the endpoint registry, and the
//! [`HttpClient`] with its rate limiter and retry policy. Domain services
//! are cheap borrowed views created on demand.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, InvalidHttpRequestError};
use crate::config::{BaseUrl, Environment, SellerId, TrendyolConfig};
use crate::error::ConfigError;
use crate::rest::endpoints::{self, EndpointRegistry, PathArg};
use crate::rest::resources::{
    Addresses, Categories, Claims, CommonLabels, Finance, Member, Orders, PriceInventory,
    Products, ShipmentProviders, TestOrders,
};

/// Client for the Trendyol seller integration API.
///
/// All requests made through one client (and every service borrowed from
/// it) share a single rate limiter, so the configured requests-per-minute
/// budget holds across concurrent tasks.
///
/// # Thread Safety
///
/// `TrendyolClient` is `Send + Sync`. Share it behind an `Arc` to use it
/// from several tasks.
///
/// # Example
///
/// ```rust,ignore
/// use trendyol_api::{ApiKey, ApiSecret, SellerId, TrendyolClient, TrendyolConfig};
///
/// let config = TrendyolConfig::builder()
///     .seller_id(SellerId::new("123456")?)
///     .api_key(ApiKey::new("key")?)
///     .api_secret(ApiSecret::new("secret")?)
///     .build()?;
///
/// let client = TrendyolClient::new(config)?;
/// client.test_authentication().await?;
///
/// for product in client.products().list(0, 50).await? {
///     println!("{} {}", product.barcode, product.title);
/// }
///
/// client.close();
/// ```
#[derive(Debug)]
pub struct TrendyolClient {
    seller_id: SellerId,
    environment: Environment,
    endpoints: EndpointRegistry,
    http: HttpClient,
}

// Verify TrendyolClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TrendyolClient>();
};

impl TrendyolClient {
    /// Creates a client from a validated configuration.
    ///
    /// No request is sent; use [`test_authentication`](Self::test_authentication)
    /// to check the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the HTTP transport cannot be built or the
    /// credentials or user agent cannot be sent as header values.
    pub fn new(config: TrendyolConfig) -> Result<Self, ConfigError> {
        let http = HttpClient::new(&config)?;
        Ok(Self {
            seller_id: config.seller_id().clone(),
            environment: config.environment(),
            endpoints: EndpointRegistry::new(config.endpoint_overrides().clone()),
            http,
        })
    }

    /// Returns the seller id every seller-scoped path is built with.
    #[must_use]
    pub fn seller_id(&self) -> &str {
        self.seller_id.as_ref()
    }

    /// Returns the environment preset the client was configured with.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the base URL requests are currently sent to.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.http.base_url()
    }

    /// Points the client at another gateway. Requests already in flight
    /// keep the URL they started with.
    pub fn set_base_url(&self, url: BaseUrl) {
        self.http.set_base_url(url);
    }

    /// Returns a copy of the endpoint table with this client's overrides
    /// applied. Changing the copy does not affect the client.
    #[must_use]
    pub fn endpoints(&self) -> HashMap<String, String> {
        self.endpoints.merged()
    }

    /// Returns the endpoint registry.
    #[must_use]
    pub const fn endpoint_registry(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    /// Returns the underlying HTTP client.
    ///
    /// Use it to call endpoints that have no service method yet.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// Resolves an endpoint key against this client's registry.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if a catalogued template does not
    /// match `args`.
    pub fn resolve(&self, key: &str, args: &[PathArg]) -> Result<String, InvalidHttpRequestError> {
        self.endpoints.resolve(key, args)
    }

    /// Stops the rate limiter's refill task.
    ///
    /// Requests can still use tokens left in the bucket; once it is empty
    /// they fail with [`HttpError::RateLimiterClosed`]. Calling `close`
    /// again has no effect.
    pub fn close(&self) {
        self.http.close();
    }

    /// Checks the credentials with a one-item product listing.
    ///
    /// # Errors
    ///
    /// Returns the [`HttpError`] of the failed request; a 401 means the
    /// credentials were rejected.
    pub async fn test_authentication(&self) -> Result<(), HttpError> {
        let path = self.resolve(endpoints::GET_PRODUCTS, &[PathArg::from(self.seller_id())])?;
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_param("size", 1)
            .build();
        self.http
            .request_empty(&request, &CancellationToken::new())
            .await
    }

    /// Checks that the gateway answers for this seller.
    ///
    /// # Errors
    ///
    /// Returns the [`HttpError`] of the failed request.
    pub async fn health_check(&self) -> Result<(), HttpError> {
        let path = self.resolve(endpoints::GET_PRODUCTS, &[PathArg::from(self.seller_id())])?;
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_param("page", 0)
            .query_param("size", 1)
            .build();
        self.http
            .request_empty(&request, &CancellationToken::new())
            .await
    }

    /// Product catalogue operations.
    #[must_use]
    pub fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    /// Price and stock updates.
    #[must_use]
    pub fn price_inventory(&self) -> PriceInventory<'_> {
        PriceInventory::new(self)
    }

    /// Order and shipment package operations.
    #[must_use]
    pub fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    /// Customer return operations.
    #[must_use]
    pub fn claims(&self) -> Claims<'_> {
        Claims::new(self)
    }

    /// Seller address lookups.
    #[must_use]
    pub fn addresses(&self) -> Addresses<'_> {
        Addresses::new(self)
    }

    /// Category and brand lookups.
    #[must_use]
    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }

    /// Settlement and cargo invoice lookups.
    #[must_use]
    pub fn finance(&self) -> Finance<'_> {
        Finance::new(self)
    }

    /// Common shipping label operations.
    #[must_use]
    pub fn common_labels(&self) -> CommonLabels<'_> {
        CommonLabels::new(self)
    }

    /// Country and city lookups.
    #[must_use]
    pub fn member(&self) -> Member<'_> {
        Member::new(self)
    }

    /// Test-order operations, available on the stage gateway only.
    #[must_use]
    pub fn test_orders(&self) -> TestOrders<'_> {
        TestOrders::new(self)
    }

    /// Cargo company lookups.
    #[must_use]
    pub fn shipment_providers(&self) -> ShipmentProviders<'_> {
        ShipmentProviders::new(self)
    }
}
