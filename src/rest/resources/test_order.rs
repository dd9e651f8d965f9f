//! Sandbox-only helpers for creating and driving test orders.
//!
//! These endpoints exist only on the stage gateway; build the client with
//! [`TrendyolConfigBuilder::sandbox`](crate::TrendyolConfigBuilder::sandbox)
//! before using them.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::order::UpdatePackageStatusRequest;
use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::endpoints::{self, PathArg};
use crate::rest::ResourceError;

/// Body of [`TestOrders::create_test_order`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestOrderRequest {
    pub customer: TestOrderCustomer,
    pub invoice_address: TestOrderAddress,
    pub shipping_address: TestOrderAddress,
    pub lines: Vec<TestOrderLine>,
    pub seller: TestOrderSeller,
    pub commercial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub micro_region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestOrderCustomer {
    pub customer_first_name: String,
    pub customer_last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestOrderAddress {
    pub address_text: String,
    pub city: String,
    pub district: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_tax_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_tax_office: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestOrderLine {
    pub barcode: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestOrderSeller {
    pub seller_id: i64,
}

/// The order created by [`TestOrders::create_test_order`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TestOrderResponse {
    pub order_number: String,
    pub shipment_package_id: i64,
}

service! {
    /// Test-order operations (stage gateway only).
    TestOrders
}

impl TestOrders<'_> {
    /// Places a test order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn create_test_order(
        &self,
        request: &TestOrderRequest,
    ) -> Result<TestOrderResponse, ResourceError> {
        let path = self.scope.path(endpoints::CREATE_TEST_ORDER, &[])?;
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .json(request)?
            .build();
        self.scope.json(request).await
    }

    /// Moves a test package to a new status.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn update_test_order_status(
        &self,
        package_id: i64,
        request: &UpdatePackageStatusRequest,
    ) -> Result<(), ResourceError> {
        let path = self.scope.path(
            endpoints::UPDATE_TEST_ORDER_STATUS,
            &[self.scope.seller(), PathArg::from(package_id)],
        )?;
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .json(request)?
            .build();
        self.scope.send(request).await
    }

    /// Puts the claim of a delivered test package into `WaitingInAction`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn set_claim_waiting_in_action(
        &self,
        shipment_package_id: i64,
    ) -> Result<(), ResourceError> {
        let path = self
            .scope
            .path(endpoints::TEST_CLAIM_WAITING_IN_ACTION, &[self.scope.seller()])?;
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(json!({ "shipmentPackageId": shipment_package_id }))
            .build();
        self.scope.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_request_body_shape() {
        let request = TestOrderRequest {
            customer: TestOrderCustomer {
                customer_first_name: "Ada".to_string(),
                customer_last_name: "Lovelace".to_string(),
            },
            lines: vec![TestOrderLine {
                barcode: "B1".to_string(),
                quantity: 1,
                discount_percentage: None,
            }],
            seller: TestOrderSeller { seller_id: 12345 },
            ..Default::default()
        };

        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["customer"]["customerFirstName"], "Ada");
        assert_eq!(body["seller"]["sellerId"], 12345);
        assert_eq!(body["lines"][0], json!({ "barcode": "B1", "quantity": 1 }));
        assert!(body["invoiceAddress"].get("company").is_none());
        assert!(body.get("microRegion").is_none());
    }
}
