//! Price and stock updates.

use serde::{Deserialize, Serialize};

use super::product::BatchResponse;
use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::endpoints;
use crate::rest::ResourceError;

/// Price and stock of one barcode.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceInventoryItem {
    pub barcode: String,
    pub quantity: u32,
    pub sale_price: f64,
    pub list_price: f64,
}

impl PriceInventoryItem {
    /// An item with zero stock and prices, which takes the barcode off sale.
    #[must_use]
    pub fn zeroed(barcode: impl Into<String>) -> Self {
        Self {
            barcode: barcode.into(),
            ..Default::default()
        }
    }

    /// Returns a copy with both prices scaled by `factor`.
    #[must_use]
    fn scaled(&self, factor: f64) -> Self {
        Self {
            sale_price: self.sale_price * factor,
            list_price: self.list_price * factor,
            ..self.clone()
        }
    }
}

#[derive(Serialize)]
struct Items<'a> {
    items: &'a [PriceInventoryItem],
}

service! {
    /// Price and inventory operations for the configured seller.
    PriceInventory
}

impl PriceInventory<'_> {
    /// Sends price and stock updates. Returns the batch to poll with
    /// [`Products::batch_status`](super::Products::batch_status).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn update(
        &self,
        items: &[PriceInventoryItem],
    ) -> Result<BatchResponse, ResourceError> {
        let path = self
            .scope
            .path(endpoints::UPDATE_PRICE_INVENTORY, &[self.scope.seller()])?;
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .json(&Items { items })?
            .build();
        self.scope.json(request).await
    }

    /// Zeroes stock and prices of one barcode.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn delete_product(&self, barcode: &str) -> Result<BatchResponse, ResourceError> {
        self.update(&[PriceInventoryItem::zeroed(barcode)]).await
    }

    /// Zeroes stock and prices of every barcode.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn delete_products<S: AsRef<str>>(
        &self,
        barcodes: &[S],
    ) -> Result<BatchResponse, ResourceError> {
        let items: Vec<_> = barcodes
            .iter()
            .map(|barcode| PriceInventoryItem::zeroed(barcode.as_ref()))
            .collect();
        self.update(&items).await
    }

    /// Raises sale and list prices by `percentage` percent and sends the
    /// result. `items` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn apply_price_increase(
        &self,
        items: &[PriceInventoryItem],
        percentage: f64,
    ) -> Result<BatchResponse, ResourceError> {
        self.update(&scale_prices(items, 1.0 + percentage / 100.0))
            .await
    }

    /// Lowers sale and list prices by `percentage` percent and sends the
    /// result. `items` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn apply_price_decrease(
        &self,
        items: &[PriceInventoryItem],
        percentage: f64,
    ) -> Result<BatchResponse, ResourceError> {
        self.update(&scale_prices(items, 1.0 - percentage / 100.0))
            .await
    }
}

fn scale_prices(items: &[PriceInventoryItem], factor: f64) -> Vec<PriceInventoryItem> {
    items.iter().map(|item| item.scaled(factor)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sale: f64, list: f64) -> PriceInventoryItem {
        PriceInventoryItem {
            barcode: "B".to_string(),
            quantity: 5,
            sale_price: sale,
            list_price: list,
        }
    }

    #[test]
    fn test_zeroed_item() {
        let item = PriceInventoryItem::zeroed("X");
        assert_eq!(item.barcode, "X");
        assert_eq!(item.quantity, 0);
        assert!(item.sale_price.abs() < f64::EPSILON);
        assert!(item.list_price.abs() < f64::EPSILON);
    }

    #[test]
    fn test_scale_prices_increase_and_decrease() {
        let items = vec![item(100.0, 200.0)];

        let up = scale_prices(&items, 1.0 + 10.0 / 100.0);
        assert!((up[0].sale_price - 110.0).abs() < 1e-9);
        assert!((up[0].list_price - 220.0).abs() < 1e-9);
        assert_eq!(up[0].quantity, 5);

        let down = scale_prices(&items, 1.0 - 25.0 / 100.0);
        assert!((down[0].sale_price - 75.0).abs() < 1e-9);
        assert!((down[0].list_price - 150.0).abs() < 1e-9);

        assert!((items[0].sale_price - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let body = serde_json::to_value(item(1.5, 2.0)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "barcode": "B",
                "quantity": 5,
                "salePrice": 1.5,
                "listPrice": 2.0
            })
        );
    }
}
