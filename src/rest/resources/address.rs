use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::endpoints;
use crate::rest::ResourceError;

/// A seller address (shipment, returning or invoice).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub id: i64,
    pub address_type: String,
    pub country: String,
    pub city: String,
    pub city_code: i64,
    pub district: String,
    pub district_id: i64,
    pub post_code: String,
    pub address: String,
    pub full_address: String,
    pub is_default: bool,
    pub is_shipment_address: bool,
    pub is_returning_address: bool,
    pub is_invoice_address: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddressesResponse {
    #[serde(default)]
    supplier_addresses: Vec<Address>,
}

service! {
    /// Seller address lookups.
    Addresses
}

impl Addresses<'_> {
    /// Lists the seller's registered addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn list(&self) -> Result<Vec<Address>, ResourceError> {
        let path = self
            .scope
            .path(endpoints::SELLER_ADDRESSES, &[self.scope.seller()])?;
        let response: AddressesResponse = self
            .scope
            .json(HttpRequest::builder(HttpMethod::Get, path).build())
            .await?;
        Ok(response.supplier_addresses)
    }
}
