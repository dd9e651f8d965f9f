//! Per-domain Trendyol services.
//!
//! Each service is a thin, borrowed view over a [`TrendyolClient`]: it
//! resolves an endpoint from the registry, substitutes the seller id and
//! other path arguments, builds an [`HttpRequest`] and hands it to the
//! shared executor. Services hold no state of their own.
//!
//! ```rust,ignore
//! use trendyol_api::{TrendyolClient, TrendyolConfig};
//!
//! let client = TrendyolClient::new(config)?;
//!
//! let page = client.products().list(0, 50).await?;
//! let orders = client.orders().list(&Default::default()).await?;
//! let label = client.common_labels().get_label("7330000000000").await?;
//! ```
//!
//! Every service call runs under a [`CancellationToken`]. By default this
//! is a fresh token that is never cancelled; use `with_cancellation` to tie
//! calls to a caller-owned token (for example a
//! [`deadline_token`](crate::clients::deadline_token)):
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use trendyol_api::clients::deadline_token;
//!
//! let products = client
//!     .products()
//!     .with_cancellation(deadline_token(Duration::from_secs(30)));
//! let page = products.list(0, 50).await?;
//! ```

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::client::TrendyolClient;
use crate::clients::{HttpError, HttpRequest};
use crate::rest::endpoints::PathArg;
use crate::rest::ResourceError;

/// The client and cancellation token a service call runs under.
#[derive(Debug, Clone)]
pub(crate) struct Scope<'a> {
    pub(crate) client: &'a TrendyolClient,
    pub(crate) cancel: CancellationToken,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(client: &'a TrendyolClient) -> Self {
        Self {
            client,
            cancel: CancellationToken::new(),
        }
    }

    /// The configured seller id as a path argument.
    pub(crate) fn seller(&self) -> PathArg {
        PathArg::from(self.client.seller_id())
    }

    /// Resolves `key` against the client's registry.
    pub(crate) fn path(&self, key: &str, args: &[PathArg]) -> Result<String, HttpError> {
        self.client.resolve(key, args).map_err(HttpError::from)
    }

    pub(crate) async fn json<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<T, ResourceError> {
        Ok(self
            .client
            .http_client()
            .request_json(&request, &self.cancel)
            .await?)
    }

    pub(crate) async fn send(&self, request: HttpRequest) -> Result<(), ResourceError> {
        Ok(self
            .client
            .http_client()
            .request_empty(&request, &self.cancel)
            .await?)
    }

    pub(crate) async fn raw(&self, request: HttpRequest) -> Result<Vec<u8>, ResourceError> {
        Ok(self
            .client
            .http_client()
            .request_raw(&request, &self.cancel)
            .await?)
    }
}

/// Declares a service struct borrowing a [`TrendyolClient`].
macro_rules! service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<'a> {
            scope: $crate::rest::resources::Scope<'a>,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(client: &'a $crate::client::TrendyolClient) -> Self {
                Self {
                    scope: $crate::rest::resources::Scope::new(client),
                }
            }

            /// Runs this service's calls under `token`.
            ///
            /// Cancelling the token aborts a call while it waits for a rate
            /// limit token, sleeps between retries or awaits a response.
            #[must_use]
            pub fn with_cancellation(
                mut self,
                token: ::tokio_util::sync::CancellationToken,
            ) -> Self {
                self.scope.cancel = token;
                self
            }
        }
    };
}

mod address;
mod category;
mod claim;
mod common_label;
mod finance;
mod member;
mod order;
mod price_inventory;
mod product;
mod shipment_provider;
mod test_order;

pub use address::{Address, Addresses};
pub use category::{AttributeValue, Brand, Categories, Category, CategoryAttribute};
pub use claim::{
    Claim, ClaimAudit, ClaimItem, ClaimItemStatus, ClaimLine, ClaimReason, ClaimReasonRef, Claims,
};
pub use common_label::{CommonLabelRequest, CommonLabels, LabelFormat};
pub use finance::{CargoInvoiceItem, Finance, Settlement};
pub use member::{City, Country, Member};
pub use order::{
    AlternativeDeliveryRequest, DeleteInvoiceLinkRequest, DiscountDetail, LaborCost,
    LineQuantity, ListOrdersOptions, Order, OrderAddress, OrderLine, Orders, PackageHistory,
    PackageLine, QuantitySplit, ShipmentPackage, UpdatePackageStatusRequest,
};
pub use price_inventory::{PriceInventory, PriceInventoryItem};
pub use product::{
    BatchItem, BatchResponse, BatchStatus, DeliveryOption, Product, ProductAttribute,
    ProductImage, ProductListOptions, Products, BATCH_STATUS_COMPLETED,
};
pub use shipment_provider::{ShipmentProvider, ShipmentProviders};
pub use test_order::{
    TestOrderAddress, TestOrderCustomer, TestOrderLine, TestOrderRequest, TestOrderResponse,
    TestOrderSeller, TestOrders,
};
