//! Product catalogue operations.
//!
//! Product writes on Trendyol are asynchronous: `create`, `update` and
//! `delete` return a [`BatchResponse`] whose id is polled with
//! [`Products::batch_status`] (or [`Products::wait_for_batch`]) until the
//! batch is processed.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use trendyol_api::rest::resources::Product;
//!
//! let product = Product {
//!     barcode: "8680000000001".to_string(),
//!     title: "Cotton T-Shirt".to_string(),
//!     ..Default::default()
//! };
//!
//! let batch = client.products().create(&[product]).await?;
//! let status = client
//!     .products()
//!     .wait_for_batch(&batch.batch_request_id, Duration::from_secs(5))
//!     .await?;
//! println!("{} succeeded, {} failed", status.succeeded_items(), status.failed_items());
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpError, HttpMethod, HttpRequest};
use crate::rest::endpoints;
use crate::rest::query::to_query_pairs;
use crate::rest::{Page, ResourceError};

/// Batch status reported once Trendyol has processed every item.
pub const BATCH_STATUS_COMPLETED: &str = "COMPLETED";

/// A product, as listed by Trendyol and as sent when creating or updating.
///
/// Fields that Trendyol only reports (approval flags, timestamps, ...) are
/// optional and omitted from request bodies when unset.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub barcode: String,
    pub title: String,
    pub product_main_id: String,
    pub brand_id: i64,
    pub category_id: i64,
    pub quantity: i64,
    pub stock_code: String,
    pub dimensional_weight: f64,
    pub description: String,
    pub currency_type: String,
    pub list_price: f64,
    pub sale_price: f64,
    pub vat_rate: i64,
    pub cargo_company_id: i64,
    pub images: Vec<ProductImage>,
    pub attributes: Vec<ProductAttribute>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_option: Option<DeliveryOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_address_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returning_address_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_unit_type: Option<String>,

    // Reported by listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pim_category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_date_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_active_campaign: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_sale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reject_reason_details: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blacklisted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_html_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_listing_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_content_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductImage {
    pub url: String,
}

/// A category attribute set on a product.
///
/// When writing, set either `attribute_value_id` (a predefined value) or
/// `custom_attribute_value`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductAttribute {
    pub attribute_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_value_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_attribute_value: Option<String>,
}

/// Delivery settings of a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryOption {
    pub delivery_duration: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_delivery_type: Option<String>,
}

/// The id of an accepted asynchronous batch.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub batch_request_id: String,
}

/// Processing state of a batch request.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchStatus {
    pub batch_request_id: String,
    pub status: String,
    pub creation_date: i64,
    pub last_modification: i64,
    pub source_type: String,
    pub item_count: i64,
    pub failed_item_count: i64,
    pub batch_request_type: String,
    pub items: Vec<BatchItem>,
}

impl BatchStatus {
    /// Items that went through: `item_count - failed_item_count`, never negative.
    #[must_use]
    pub fn succeeded_items(&self) -> u64 {
        u64::try_from(self.item_count.saturating_sub(self.failed_items_signed())).unwrap_or(0)
    }

    /// Items that failed, between zero and `item_count`.
    #[must_use]
    pub fn failed_items(&self) -> u64 {
        u64::try_from(self.failed_items_signed()).unwrap_or(0)
    }

    /// Returns `true` once Trendyol has finished processing the batch.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == BATCH_STATUS_COMPLETED
    }

    fn failed_items_signed(&self) -> i64 {
        self.failed_item_count.clamp(0, self.item_count.max(0))
    }
}

/// Outcome of a single batch item.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchItem {
    pub request_item: serde_json::Value,
    pub status: String,
    pub failure_reasons: Vec<String>,
}

/// Filters for [`Products::list_with_options`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_main_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_sale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blacklisted: Option<bool>,
    /// Sent as epoch milliseconds.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub start_date: Option<DateTime<Utc>>,
    /// Sent as epoch milliseconds.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub end_date: Option<DateTime<Utc>>,
    /// `CREATED_DATE` or `LAST_MODIFIED_DATE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_query_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub brand_ids: Vec<i64>,
}

#[derive(Serialize)]
struct Items<'a, T> {
    items: &'a [T],
}

service! {
    /// Product operations for the configured seller.
    Products
}

impl Products<'_> {
    /// Submits new products. Returns the batch to poll.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn create(&self, products: &[Product]) -> Result<BatchResponse, ResourceError> {
        self.write(HttpMethod::Post, endpoints::CREATE_PRODUCTS, products)
            .await
    }

    /// Submits product updates. Returns the batch to poll.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn update(&self, products: &[Product]) -> Result<BatchResponse, ResourceError> {
        self.write(HttpMethod::Put, endpoints::UPDATE_PRODUCTS, products)
            .await
    }

    /// Deletes products by barcode. Returns the batch to poll.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn delete<S: AsRef<str>>(
        &self,
        barcodes: &[S],
    ) -> Result<BatchResponse, ResourceError> {
        let items: Vec<_> = barcodes
            .iter()
            .map(|barcode| json!({ "barcode": barcode.as_ref() }))
            .collect();
        self.write(HttpMethod::Delete, endpoints::DELETE_PRODUCTS, &items)
            .await
    }

    /// Fetches the processing state of a batch.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails or the body is
    /// not a batch status.
    pub async fn batch_status(&self, batch_request_id: &str) -> Result<BatchStatus, ResourceError> {
        let path = self.scope.path(
            endpoints::GET_BATCH_REQUEST_RESULT,
            &[self.scope.seller(), batch_request_id.into()],
        )?;
        self.scope
            .json(HttpRequest::builder(HttpMethod::Get, path).build())
            .await
    }

    /// Polls [`batch_status`](Self::batch_status) every `interval` until the
    /// batch is completed.
    ///
    /// Bound the wait with [`with_cancellation`](Self::with_cancellation) and
    /// a [`deadline_token`](crate::clients::deadline_token).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if a status request fails or the wait
    /// is cancelled.
    pub async fn wait_for_batch(
        &self,
        batch_request_id: &str,
        interval: Duration,
    ) -> Result<BatchStatus, ResourceError> {
        loop {
            let status = self.batch_status(batch_request_id).await?;
            if status.is_completed() {
                return Ok(status);
            }
            tracing::debug!(
                batch_request_id,
                status = %status.status,
                "batch not completed yet"
            );
            tokio::select! {
                biased;
                () = self.scope.cancel.cancelled() => return Err(HttpError::Cancelled.into()),
                () = tokio::time::sleep(interval) => {}
            }
        }
    }

    /// Lists products page by page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn list(&self, page: u32, size: u32) -> Result<Page<Product>, ResourceError> {
        self.list_with_options(page, size, &ProductListOptions::default())
            .await
    }

    /// Lists products matching `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn list_with_options(
        &self,
        page: u32,
        size: u32,
        options: &ProductListOptions,
    ) -> Result<Page<Product>, ResourceError> {
        let path = self
            .scope
            .path(endpoints::GET_PRODUCTS, &[self.scope.seller()])?;
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_param("page", page)
            .query_param("size", size)
            .query_params(to_query_pairs(options)?)
            .build();
        self.scope.json(request).await
    }

    /// Finds a product by barcode.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if no product has the barcode.
    pub async fn get_by_barcode(&self, barcode: &str) -> Result<Product, ResourceError> {
        let path = self
            .scope
            .path(endpoints::GET_PRODUCTS, &[self.scope.seller()])?;
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_param("barcode", barcode)
            .build();
        let page: Page<Product> = self.scope.json(request).await?;

        page.into_content()
            .into_iter()
            .next()
            .ok_or_else(|| ResourceError::NotFound {
                resource: "Product",
                key: format!("barcode {barcode}"),
            })
    }

    async fn write<T: Serialize>(
        &self,
        method: HttpMethod,
        key: &str,
        items: &[T],
    ) -> Result<BatchResponse, ResourceError> {
        let path = self.scope.path(key, &[self.scope.seller()])?;
        let request = HttpRequest::builder(method, path)
            .json(&Items { items })?
            .build();
        self.scope.json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_counts() {
        let status = BatchStatus {
            item_count: 10,
            failed_item_count: 3,
            ..Default::default()
        };
        assert_eq!(status.succeeded_items(), 7);
        assert_eq!(status.failed_items(), 3);
    }

    #[test]
    fn test_batch_counts_clamp_at_zero() {
        let status = BatchStatus {
            item_count: 2,
            failed_item_count: 5,
            ..Default::default()
        };
        assert_eq!(status.succeeded_items(), 0);
        assert_eq!(status.failed_items(), 2);

        let status = BatchStatus {
            item_count: -3,
            failed_item_count: 1,
            ..Default::default()
        };
        assert_eq!(status.failed_items(), 0);
        assert_eq!(status.succeeded_items(), 0);

        let status = BatchStatus {
            item_count: 4,
            failed_item_count: -1,
            ..Default::default()
        };
        assert_eq!(status.failed_items(), 0);
        assert_eq!(status.succeeded_items(), 4);
    }

    #[test]
    fn test_batch_status_deserializes_with_items() {
        let status: BatchStatus = serde_json::from_str(
            r#"{
                "batchRequestId": "b-1",
                "status": "COMPLETED",
                "itemCount": 2,
                "failedItemCount": 1,
                "items": [
                    {"requestItem": {"barcode": "X"}, "status": "SUCCESS"},
                    {"requestItem": {"barcode": "Y"}, "status": "FAILED", "failureReasons": ["bad brand"]}
                ]
            }"#,
        )
        .unwrap();

        assert!(status.is_completed());
        assert_eq!(status.items.len(), 2);
        assert_eq!(status.items[1].failure_reasons, vec!["bad brand".to_string()]);
    }

    #[test]
    fn test_product_request_body_omits_unset_read_only_fields() {
        let product = Product {
            barcode: "B1".to_string(),
            title: "T".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(&product).unwrap();

        assert_eq!(body["barcode"], "B1");
        assert!(body.get("approved").is_none());
        assert!(body.get("rejectReasonDetails").is_none());
        assert!(body.get("images").is_some());
    }

    #[test]
    fn test_list_options_to_query() {
        let options = ProductListOptions {
            approved: Some(true),
            start_date: DateTime::from_timestamp(1_700_000_000, 0),
            brand_ids: vec![1, 2],
            ..Default::default()
        };

        let pairs = to_query_pairs(&options).unwrap();

        assert!(pairs.contains(&("approved".to_string(), "true".to_string())));
        assert!(pairs.contains(&("startDate".to_string(), "1700000000000".to_string())));
        assert_eq!(pairs.iter().filter(|(k, _)| k == "brandIds").count(), 2);
        assert!(!pairs.iter().any(|(k, _)| k == "endDate"));
    }
}
