//! Settlements and cargo invoices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::endpoints;
use crate::rest::{Page, ResourceError};

/// A settlement transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settlement {
    pub id: String,
    pub transaction_date: i64,
    pub settlement_date: i64,
    pub payment_date: Option<i64>,
    pub transaction_type: String,
    pub order_number: String,
    pub shipment_package_id: Option<i64>,
    pub barcode: Option<String>,
    pub description: String,
    pub debt: f64,
    pub credit: f64,
    pub commission_rate: Option<f64>,
    pub commission_amount: f64,
    pub seller_revenue: f64,
    pub payment_order_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_serial_number: Option<String>,
}

/// A line of a cargo invoice.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CargoInvoiceItem {
    pub invoice_serial_number: String,
    pub order_number: String,
    pub shipment_package_id: i64,
    pub shipment_package_type: String,
    pub amount: f64,
    pub desi: Option<f64>,
    pub cargo_provider_name: String,
}

service! {
    /// Finance lookups for the configured seller.
    Finance
}

impl Finance<'_> {
    /// Lists settlements between `start` and `end`.
    ///
    /// Trendyol limits the range to 15 days.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn settlements(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page: u32,
        size: u32,
    ) -> Result<Page<Settlement>, ResourceError> {
        let path = self
            .scope
            .path(endpoints::GET_SETTLEMENTS, &[self.scope.seller()])?;
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_param("startDate", start.timestamp_millis())
            .query_param("endDate", end.timestamp_millis())
            .query_param("page", page)
            .query_param("size", size)
            .build();
        self.scope.json(request).await
    }

    /// Returns the lines of a cargo invoice.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn cargo_invoice_details(
        &self,
        invoice_serial_number: &str,
    ) -> Result<Vec<CargoInvoiceItem>, ResourceError> {
        let path = self.scope.path(
            endpoints::GET_CARGO_INVOICE_DETAILS,
            &[self.scope.seller(), invoice_serial_number.into()],
        )?;
        self.scope
            .json(HttpRequest::builder(HttpMethod::Get, path).build())
            .await
    }
}
