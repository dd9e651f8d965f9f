//! Country and city lookups used in addresses.

use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::endpoints::{self, PathArg};
use crate::rest::ResourceError;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Country {
    pub id: i64,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub country_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

service! {
    /// Geographic lookups.
    Member
}

impl Member<'_> {
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn countries(&self) -> Result<Vec<Country>, ResourceError> {
        self.get(endpoints::GET_COUNTRIES, &[]).await
    }

    /// Cities of a country, by country code (e.g. `AZ`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn country_cities(&self, country_code: &str) -> Result<Vec<City>, ResourceError> {
        self.get(endpoints::GET_COUNTRY_CITIES, &[country_code.into()])
            .await
    }

    /// Cities served by domestic delivery, by country code (e.g. `TR`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn domestic_cities(&self, country_code: &str) -> Result<Vec<City>, ResourceError> {
        self.get(endpoints::GET_DOMESTIC_CITIES, &[country_code.into()])
            .await
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        args: &[PathArg],
    ) -> Result<T, ResourceError> {
        let path = self.scope.path(key, args)?;
        self.scope
            .json(HttpRequest::builder(HttpMethod::Get, path).build())
            .await
    }
}
