//! Shipping labels for packages shipped under Trendyol's common label
//! agreement.
//!
//! Labels are returned as the carrier's raw document (ZPL by default), not
//! JSON, so [`CommonLabels::get_label`] hands back the body bytes unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::endpoints;
use crate::rest::ResourceError;

/// Label document format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LabelFormat {
    #[default]
    Zpl,
    Pdf,
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zpl => f.write_str("ZPL"),
            Self::Pdf => f.write_str("PDF"),
        }
    }
}

/// Body of [`CommonLabels::create_label`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommonLabelRequest {
    pub format: LabelFormat,
    pub box_quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumetric_height: Option<f64>,
}

service! {
    /// Common label operations for the configured seller.
    CommonLabels
}

impl CommonLabels<'_> {
    /// Requests label generation for a cargo tracking number.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn create_label(
        &self,
        cargo_tracking_number: &str,
        request: &CommonLabelRequest,
    ) -> Result<(), ResourceError> {
        let path = self.scope.path(
            endpoints::CREATE_COMMON_LABEL,
            &[self.scope.seller(), cargo_tracking_number.into()],
        )?;
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .json(request)?
            .build();
        self.scope.send(request).await
    }

    /// Downloads a generated label.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_label(&self, cargo_tracking_number: &str) -> Result<Vec<u8>, ResourceError> {
        let path = self.scope.path(
            endpoints::GET_COMMON_LABEL,
            &[self.scope.seller(), cargo_tracking_number.into()],
        )?;
        self.scope
            .raw(HttpRequest::builder(HttpMethod::Get, path).build())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_request_body() {
        let request = CommonLabelRequest {
            box_quantity: 2,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "format": "ZPL", "boxQuantity": 2 })
        );
    }

    #[test]
    fn test_label_format_display() {
        assert_eq!(LabelFormat::Zpl.to_string(), "ZPL");
        assert_eq!(LabelFormat::Pdf.to_string(), "PDF");
    }
}
