use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::endpoints;
use crate::rest::ResourceError;

/// A cargo company.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipmentProvider {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub tax_number: String,
}

service! {
    /// Cargo company lookups.
    ShipmentProviders
}

impl ShipmentProviders<'_> {
    /// Lists the cargo companies Trendyol works with.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn list(&self) -> Result<Vec<ShipmentProvider>, ResourceError> {
        let path = self.scope.path(endpoints::GET_SHIPMENT_PROVIDERS, &[])?;
        self.scope
            .json(HttpRequest::builder(HttpMethod::Get, path).build())
            .await
    }
}
