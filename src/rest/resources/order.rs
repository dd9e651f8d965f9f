//! Order and shipment package operations.
//!
//! Trendyol identifies a package by its shipment package id; most write
//! operations address `/shipment-packages/{id}` below the seller.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::address::Address;
use crate::clients::{HttpError, HttpMethod, HttpRequest};
use crate::rest::endpoints::{self, PathArg};
use crate::rest::query::to_query_pairs;
use crate::rest::{Page, ResourceError};

/// Filters for [`Orders::list`] and [`Orders::list_packages`].
///
/// `page` and `size` are always sent; the rest only when set.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by_direction: Option<String>,
    pub page: u32,
    pub size: u32,
}

/// A shipment package as returned by the order listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    /// The shipment package id.
    pub id: i64,
    pub order_number: String,
    pub shipment_address: Option<OrderAddress>,
    pub invoice_address: Option<OrderAddress>,
    pub gross_amount: f64,
    pub total_discount: f64,
    pub total_ty_discount: f64,
    pub total_price: f64,
    pub tax_number: Option<String>,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_id: i64,
    pub cargo_tracking_number: Option<i64>,
    pub cargo_tracking_link: Option<String>,
    pub cargo_sender_number: Option<String>,
    pub cargo_provider_name: Option<String>,
    pub cargo_deci: f64,
    pub lines: Vec<OrderLine>,
    pub order_date: i64,
    pub identity_number: String,
    pub currency_code: String,
    pub package_histories: Vec<PackageHistory>,
    pub shipment_package_status: String,
    pub status: String,
    pub delivery_type: String,
    pub delivery_address_type: String,
    pub time_slot_id: i64,
    pub scheduled_delivery_store_id: String,
    pub estimated_delivery_start_date: i64,
    pub estimated_delivery_end_date: i64,
    pub agreed_delivery_date: i64,
    pub agreed_delivery_date_extendible: bool,
    pub extended_agreed_delivery_date: i64,
    pub agreed_delivery_extension_start_date: i64,
    pub agreed_delivery_extension_end_date: i64,
    pub fast_delivery: bool,
    pub fast_delivery_type: String,
    pub origin_shipment_date: i64,
    pub last_modified_date: i64,
    pub commercial: bool,
    pub delivered_by_service: bool,
    pub warehouse_id: i64,
    pub group_deal: bool,
    pub micro: bool,
    pub gift_box_requested: bool,
    pub etgb_no: String,
    pub etgb_date: String,
    #[serde(rename = "3PbyTrendyol")]
    pub three_p_by_trendyol: bool,
    pub contains_dangerous_product: bool,
    pub is_cod: bool,
    pub created_by: String,
    pub origin_package_ids: Vec<i64>,
}

/// Shipping or invoice address on an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderAddress {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub company: String,
    pub address1: String,
    pub address2: String,
    pub full_address: String,
    pub short_address: String,
    pub city: String,
    pub city_code: i64,
    pub district: String,
    pub district_id: i64,
    pub county_id: i64,
    pub county_name: String,
    pub neighborhood: String,
    pub neighborhood_id: i64,
    pub state_name: String,
    pub postal_code: String,
    pub country_code: String,
    pub phone: Option<i64>,
    pub latitude: String,
    pub longitude: String,
}

/// An order line.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderLine {
    /// The order line id.
    pub id: i64,
    pub quantity: i64,
    pub sales_campaign_id: i64,
    pub product_size: String,
    pub merchant_sku: String,
    pub product_name: String,
    pub product_code: i64,
    pub product_origin: String,
    pub merchant_id: i64,
    pub amount: f64,
    pub discount: f64,
    pub ty_discount: f64,
    pub discount_details: Vec<DiscountDetail>,
    pub currency_code: String,
    pub product_color: String,
    pub sku: String,
    pub vat_base_amount: f64,
    pub barcode: String,
    pub order_line_item_status_name: String,
    pub price: f64,
    pub product_category_id: i64,
}

/// Per-unit discount breakdown of an order line.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscountDetail {
    pub line_item_price: f64,
    pub line_item_discount: f64,
    pub line_item_ty_discount: f64,
}

/// A status change in a package's history.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageHistory {
    pub created_date: i64,
    pub status: String,
}

/// Older, flatter package shape served by the same listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipmentPackage {
    pub id: i64,
    pub supplier_id: i64,
    pub status: String,
    pub creation_date: i64,
    pub last_modified_date: i64,
    pub buyer_id: i64,
    pub shipping_address: Option<Address>,
    pub billing_address: Option<Address>,
    pub cargo_tracking_number: Option<String>,
    pub cargo_provider_name: Option<String>,
    pub lines: Vec<PackageLine>,
}

/// A line of a [`ShipmentPackage`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageLine {
    pub line_id: i64,
    pub barcode: String,
    pub quantity: i64,
    pub price: f64,
    pub product_name: String,
    pub merchant_sku: String,
    pub package_id: i64,
}

/// Body of [`Orders::update_status`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UpdatePackageStatusRequest {
    /// Target status, e.g. `Picking` or `Invoiced`.
    pub status: String,
    pub lines: Vec<LineQuantity>,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub params: HashMap<String, String>,
}

impl UpdatePackageStatusRequest {
    /// Creates a request moving the given lines to `status`.
    #[must_use]
    pub fn new(status: impl Into<String>, lines: Vec<LineQuantity>) -> Self {
        Self {
            status: status.into(),
            lines,
            params: HashMap::new(),
        }
    }

    /// Adds a status parameter (e.g. `invoiceNumber` for `Invoiced`).
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// A package line and quantity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineQuantity {
    pub line_id: i64,
    pub quantity: u32,
}

/// Quantity split of one order line for [`Orders::quantity_split_package`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuantitySplit {
    pub order_line_id: i64,
    pub quantities: Vec<u32>,
}

/// Body of [`Orders::alternative_delivery`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeDeliveryRequest {
    pub is_phone_number: bool,
    pub tracking_info: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deci: Option<f64>,
}

/// Body of [`Orders::delete_invoice_link`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteInvoiceLinkRequest {
    /// The invoice id returned when the link was sent.
    pub service_source_id: i64,
    pub channel_id: i64,
    pub customer_id: i64,
}

/// Labor cost of an order line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaborCost {
    pub order_line_id: i64,
    pub labor_cost_per_item: f64,
}

service! {
    /// Order and shipment package operations for the configured seller.
    Orders
}

impl Orders<'_> {
    /// Lists orders.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn list(&self, options: &ListOrdersOptions) -> Result<Page<Order>, ResourceError> {
        self.scope.json(self.list_request(options)?).await
    }

    /// Lists the same packages in the older [`ShipmentPackage`] shape.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn list_packages(
        &self,
        options: &ListOrdersOptions,
    ) -> Result<Page<ShipmentPackage>, ResourceError> {
        self.scope.json(self.list_request(options)?).await
    }

    /// Moves package lines to a new status.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn update_status(
        &self,
        package_id: i64,
        request: &UpdatePackageStatusRequest,
    ) -> Result<(), ResourceError> {
        self.package_call(
            HttpMethod::Put,
            endpoints::UPDATE_PACKAGE_STATUS,
            package_id,
            Some(to_body(request)?),
        )
        .await
    }

    /// Sets the cargo tracking number of a package.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn update_tracking_number(
        &self,
        package_id: i64,
        tracking_number: &str,
    ) -> Result<(), ResourceError> {
        let body = json!({ "trackingNumber": tracking_number });
        self.package_call(
            HttpMethod::Put,
            endpoints::UPDATE_TRACKING_NUMBER,
            package_id,
            Some(body),
        )
        .await
    }

    /// Attaches an invoice link to a package.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn send_invoice_link(
        &self,
        package_id: i64,
        invoice_link: &str,
    ) -> Result<(), ResourceError> {
        let path = self
            .scope
            .path(endpoints::SEND_INVOICE_LINK, &[self.scope.seller()])?;
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(json!({ "shipmentPackageId": package_id, "invoiceLink": invoice_link }))
            .build();
        self.scope.send(request).await
    }

    /// Removes a previously sent invoice link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn delete_invoice_link(
        &self,
        request: &DeleteInvoiceLinkRequest,
    ) -> Result<(), ResourceError> {
        let path = self
            .scope
            .path(endpoints::DELETE_INVOICE_LINK, &[self.scope.seller()])?;
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .json(request)?
            .build();
        self.scope.send(request).await
    }

    /// Reports package lines as unsupplied.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn cancel_package_items(
        &self,
        package_id: i64,
        lines: &[LineQuantity],
    ) -> Result<(), ResourceError> {
        let body = json!({ "lines": lines, "reasonId": 0 });
        self.package_call(
            HttpMethod::Put,
            endpoints::CANCEL_PACKAGE_ITEMS,
            package_id,
            Some(body),
        )
        .await
    }

    /// Moves the given order lines into a new package.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn split_package(
        &self,
        package_id: i64,
        order_line_ids: &[i64],
    ) -> Result<(), ResourceError> {
        let body = json!({ "orderLineIds": order_line_ids });
        self.package_call(
            HttpMethod::Post,
            endpoints::SPLIT_PACKAGE,
            package_id,
            Some(body),
        )
        .await
    }

    /// Splits a package into one new package per group of order lines.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn multi_split_package(
        &self,
        package_id: i64,
        groups: &[Vec<i64>],
    ) -> Result<(), ResourceError> {
        let split_groups: Vec<_> = groups
            .iter()
            .map(|ids| json!({ "orderLineIds": ids }))
            .collect();
        let body = json!({ "splitGroups": split_groups });
        self.package_call(
            HttpMethod::Post,
            endpoints::MULTI_SPLIT_PACKAGE,
            package_id,
            Some(body),
        )
        .await
    }

    /// Splits order lines by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn quantity_split_package(
        &self,
        package_id: i64,
        splits: &[QuantitySplit],
    ) -> Result<(), ResourceError> {
        let body = json!({ "quantitySplit": splits });
        self.package_call(
            HttpMethod::Post,
            endpoints::QUANTITY_SPLIT_PACKAGE,
            package_id,
            Some(body),
        )
        .await
    }

    /// Sets box count and volumetric weight.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn update_box_info(
        &self,
        package_id: i64,
        box_quantity: u32,
        deci: f64,
    ) -> Result<(), ResourceError> {
        let body = json!({ "boxQuantity": box_quantity, "deci": deci });
        self.package_call(
            HttpMethod::Put,
            endpoints::UPDATE_BOX_INFO,
            package_id,
            Some(body),
        )
        .await
    }

    /// Ships a package with an alternative carrier.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn alternative_delivery(
        &self,
        package_id: i64,
        request: &AlternativeDeliveryRequest,
    ) -> Result<(), ResourceError> {
        self.package_call(
            HttpMethod::Put,
            endpoints::ALTERNATIVE_DELIVERY,
            package_id,
            Some(to_body(request)?),
        )
        .await
    }

    /// Marks a package delivered by its cargo tracking number.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn manual_deliver(&self, cargo_tracking_number: &str) -> Result<(), ResourceError> {
        self.tracking_call(endpoints::MANUAL_DELIVER, cargo_tracking_number)
            .await
    }

    /// Marks a package returned by its cargo tracking number.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn manual_return(&self, cargo_tracking_number: &str) -> Result<(), ResourceError> {
        self.tracking_call(endpoints::MANUAL_RETURN, cargo_tracking_number)
            .await
    }

    /// Changes the cargo provider of a package.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn update_cargo_provider(
        &self,
        package_id: i64,
        cargo_provider: &str,
    ) -> Result<(), ResourceError> {
        let body = json!({ "cargoProvider": cargo_provider });
        self.package_call(
            HttpMethod::Put,
            endpoints::UPDATE_CARGO_PROVIDER,
            package_id,
            Some(body),
        )
        .await
    }

    /// Changes the warehouse a package ships from.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn update_warehouse(
        &self,
        package_id: i64,
        warehouse_id: i64,
    ) -> Result<(), ResourceError> {
        let body = json!({ "warehouseId": warehouse_id });
        self.package_call(
            HttpMethod::Put,
            endpoints::UPDATE_WAREHOUSE,
            package_id,
            Some(body),
        )
        .await
    }

    /// Extends the agreed delivery date by a number of days.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn extend_delivery_date(
        &self,
        package_id: i64,
        extended_day_count: u32,
    ) -> Result<(), ResourceError> {
        let body = json!({ "extendedDayCount": extended_day_count });
        self.package_call(
            HttpMethod::Put,
            endpoints::EXTEND_DELIVERY_DATE,
            package_id,
            Some(body),
        )
        .await
    }

    /// Reports labor costs per order line.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn update_labor_costs(
        &self,
        package_id: i64,
        costs: &[LaborCost],
    ) -> Result<(), ResourceError> {
        self.package_call(
            HttpMethod::Put,
            endpoints::UPDATE_LABOR_COSTS,
            package_id,
            Some(to_body(costs)?),
        )
        .await
    }

    /// Marks a package as delivered by a service provider.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn delivered_by_service(&self, package_id: i64) -> Result<(), ResourceError> {
        self.package_call(
            HttpMethod::Put,
            endpoints::DELIVERED_BY_SERVICE,
            package_id,
            None,
        )
        .await
    }

    fn list_request(&self, options: &ListOrdersOptions) -> Result<HttpRequest, ResourceError> {
        let path = self
            .scope
            .path(endpoints::GET_ORDERS, &[self.scope.seller()])?;
        Ok(HttpRequest::builder(HttpMethod::Get, path)
            .query_params(to_query_pairs(options)?)
            .build())
    }

    async fn package_call(
        &self,
        method: HttpMethod,
        key: &str,
        package_id: i64,
        body: Option<serde_json::Value>,
    ) -> Result<(), ResourceError> {
        let path = self
            .scope
            .path(key, &[self.scope.seller(), PathArg::from(package_id)])?;
        let mut builder = HttpRequest::builder(method, path);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        self.scope.send(builder.build()).await
    }

    async fn tracking_call(
        &self,
        key: &str,
        cargo_tracking_number: &str,
    ) -> Result<(), ResourceError> {
        let path = self
            .scope
            .path(key, &[self.scope.seller(), cargo_tracking_number.into()])?;
        self.scope
            .send(HttpRequest::builder(HttpMethod::Put, path).build())
            .await
    }
}

fn to_body<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, HttpError> {
    serde_json::to_value(value).map_err(HttpError::Serialize)
}
