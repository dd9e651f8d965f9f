//! Customer returns ("claims").

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::endpoints;
use crate::rest::{Page, ResourceError};

/// A return request.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Claim {
    pub id: String,
    pub order_number: String,
    pub order_date: i64,
    pub claim_date: i64,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub cargo_tracking_number: Option<i64>,
    pub cargo_provider_name: Option<String>,
    pub order_shipment_package_id: Option<i64>,
    pub last_modified_date: i64,
    pub items: Vec<ClaimLine>,
}

/// An order line of a claim with its claimed units.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimLine {
    pub order_line: serde_json::Value,
    pub claim_items: Vec<ClaimItem>,
}

/// A single claimed unit.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimItem {
    /// Claim item id used by approve/reject/audit.
    pub id: String,
    pub order_line_item_id: i64,
    pub customer_claim_item_reason: Option<ClaimReasonRef>,
    pub trendyol_claim_item_reason: Option<ClaimReasonRef>,
    pub claim_item_status: Option<ClaimItemStatus>,
    pub note: String,
    pub customer_note: String,
    pub resolved: bool,
}

/// A reason attached to a claim item.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimReasonRef {
    pub id: i64,
    pub name: String,
    pub external_reason_id: i64,
    pub code: String,
}

/// Status of a claim item.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ClaimItemStatus {
    pub name: String,
}

/// A reason a seller may give when rejecting claim items.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimReason {
    pub claim_issue_reason_id: i64,
    pub reason: String,
}

/// A status transition in a claim item's history.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimAudit {
    pub claim_id: String,
    pub claim_item_id: String,
    pub previous_status: String,
    pub new_status: String,
    pub user_info_and_role: String,
    pub executor_app: String,
    pub executor_user: String,
    pub date: i64,
}

service! {
    /// Claim operations for the configured seller.
    Claims
}

impl Claims<'_> {
    /// Lists claims, optionally filtered by claim item status
    /// (e.g. `WaitingInAction`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn list(
        &self,
        status: Option<&str>,
        page: u32,
        size: u32,
    ) -> Result<Page<Claim>, ResourceError> {
        let path = self
            .scope
            .path(endpoints::GET_CLAIMS, &[self.scope.seller()])?;
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_param("page", page)
            .query_param("size", size)
            .query_param_opt("claimItemStatus", status.filter(|s| !s.is_empty()))
            .build();
        self.scope.json(request).await
    }

    /// Lists the reasons accepted by [`reject_items`](Self::reject_items).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn issue_reasons(&self) -> Result<Vec<ClaimReason>, ResourceError> {
        let path = self.scope.path(endpoints::GET_CLAIM_ISSUE_REASONS, &[])?;
        self.scope
            .json(HttpRequest::builder(HttpMethod::Get, path).build())
            .await
    }

    /// Accepts the given claim items.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn approve_items<S: AsRef<str>>(
        &self,
        claim_id: &str,
        claim_item_ids: &[S],
    ) -> Result<(), ResourceError> {
        let path = self
            .scope
            .path(endpoints::APPROVE_CLAIM, &[self.scope.seller(), claim_id.into()])?;
        let ids: Vec<&str> = claim_item_ids.iter().map(AsRef::as_ref).collect();
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(json!({ "claimLineItemIdList": ids, "params": {} }))
            .build();
        self.scope.send(request).await
    }

    /// Rejects the given claim items with a reason from
    /// [`issue_reasons`](Self::issue_reasons).
    ///
    /// Everything is sent as query parameters; the request has no body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn reject_items<S: AsRef<str>>(
        &self,
        claim_id: &str,
        reason_id: i64,
        claim_item_ids: &[S],
        description: &str,
    ) -> Result<(), ResourceError> {
        let path = self
            .scope
            .path(endpoints::REJECT_CLAIM, &[self.scope.seller(), claim_id.into()])?;
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .query_param("claimIssueReasonId", reason_id)
            .query_param("description", description)
            .query_params(
                claim_item_ids
                    .iter()
                    .map(|id| ("claimItemIdList", id.as_ref())),
            )
            .build();
        self.scope.send(request).await
    }

    /// Returns the status history of a claim item.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn audit(&self, claim_item_id: &str) -> Result<Vec<ClaimAudit>, ResourceError> {
        let path = self.scope.path(
            endpoints::GET_CLAIM_AUDIT,
            &[self.scope.seller(), claim_item_id.into()],
        )?;
        self.scope
            .json(HttpRequest::builder(HttpMethod::Get, path).build())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_page_deserializes() {
        let page: Page<Claim> = serde_json::from_value(json!({
            "content": [{
                "id": "c-1",
                "orderNumber": "123",
                "items": [{
                    "orderLine": { "id": 5 },
                    "claimItems": [{
                        "id": "ci-1",
                        "claimItemStatus": { "name": "WaitingInAction" },
                        "customerClaimItemReason": { "id": 3, "name": "Damaged" }
                    }]
                }]
            }],
            "page": 0,
            "size": 50,
            "totalPages": 1,
            "totalElements": 1
        }))
        .unwrap();

        let claim = &page.content[0];
        assert_eq!(claim.id, "c-1");
        let item = &claim.items[0].claim_items[0];
        assert_eq!(item.id, "ci-1");
        assert_eq!(item.claim_item_status.as_ref().unwrap().name, "WaitingInAction");
        assert_eq!(item.customer_claim_item_reason.as_ref().unwrap().name, "Damaged");
    }

    #[test]
    fn test_claim_reason_deserializes() {
        let reasons: Vec<ClaimReason> = serde_json::from_str(
            r#"[{"claimIssueReasonId":1651,"reason":"Wrong product returned"}]"#,
        )
        .unwrap();
        assert_eq!(reasons[0].claim_issue_reason_id, 1651);
    }
}
