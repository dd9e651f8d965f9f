//! Endpoint registry: operation keys, default path templates, and overrides.
//!
//! Every Trendyol operation is addressed by a symbolic key (e.g.
//! [`GET_PRODUCTS`]) that maps to a path template with positional
//! placeholders:
//!
//! - `%s` takes a string argument ([`PathArg::Str`])
//! - `%d` takes an integer argument ([`PathArg::Int`])
//! - `%%` is a literal percent sign
//!
//! A client may override any key at construction time. Overrides shadow the
//! built-in table per client; the table itself is never mutated.
//!
//! # Resolution
//!
//! 1. An override for the key, if present.
//! 2. The built-in template for the key, if present.
//! 3. Otherwise the key itself is used as the template.
//!
//! Templates from steps 1 and 2 are resolved strictly: the argument count and
//! kinds must match the placeholders. The key-as-template fallback never
//! fails; it fills whatever placeholders it can and ignores the rest.
//!
//! # Example
//!
//! ```rust
//! use trendyol_api::rest::{endpoints, EndpointRegistry, PathArg};
//!
//! let registry = EndpointRegistry::default();
//! let path = registry
//!     .resolve(endpoints::UPDATE_PACKAGE_STATUS, &["123".into(), 42_i64.into()])
//!     .unwrap();
//! assert_eq!(path, "/integration/order/sellers/123/shipment-packages/42");
//!
//! // Keys that are not in the table are used as the path.
//! let path = registry.resolve("/integration/new/%s/thing", &[PathArg::from("9")]).unwrap();
//! assert_eq!(path, "/integration/new/9/thing");
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::clients::InvalidHttpRequestError;

// Product
pub const GET_BRANDS: &str = "GetBrands";
pub const GET_CATEGORIES: &str = "GetCategories";
pub const GET_CATEGORY_ATTRIBUTES: &str = "GetCategoryAttributes";
pub const GET_PRODUCTS: &str = "GetProducts";
pub const CREATE_PRODUCTS: &str = "CreateProducts";
pub const UPDATE_PRODUCTS: &str = "UpdateProducts";
pub const DELETE_PRODUCTS: &str = "DeleteProducts";
pub const GET_BATCH_REQUEST_RESULT: &str = "GetBatchRequestResult";

// Inventory
pub const UPDATE_PRICE_INVENTORY: &str = "UpdatePriceInventory";

// Order
pub const GET_ORDERS: &str = "GetOrders";
pub const UPDATE_PACKAGE_STATUS: &str = "UpdatePackageStatus";
pub const UPDATE_TRACKING_NUMBER: &str = "UpdateTrackingNumber";
pub const CANCEL_PACKAGE_ITEMS: &str = "CancelPackageItems";
pub const SPLIT_PACKAGE: &str = "SplitPackage";
pub const MULTI_SPLIT_PACKAGE: &str = "MultiSplitPackage";
pub const QUANTITY_SPLIT_PACKAGE: &str = "QuantitySplitPackage";
pub const UPDATE_BOX_INFO: &str = "UpdateBoxInfo";
pub const ALTERNATIVE_DELIVERY: &str = "AlternativeDelivery";
pub const MANUAL_DELIVER: &str = "ManualDeliver";
pub const MANUAL_RETURN: &str = "ManualReturn";
pub const UPDATE_CARGO_PROVIDER: &str = "UpdateCargoProvider";
pub const UPDATE_WAREHOUSE: &str = "UpdateWarehouse";
pub const EXTEND_DELIVERY_DATE: &str = "ExtendDeliveryDate";
pub const UPDATE_LABOR_COSTS: &str = "UpdateLaborCosts";
pub const DELIVERED_BY_SERVICE: &str = "DeliveredByService";

// Claims
pub const GET_CLAIMS: &str = "GetClaims";
pub const APPROVE_CLAIM: &str = "ApproveClaim";
pub const REJECT_CLAIM: &str = "RejectClaim";
pub const GET_CLAIM_ISSUE_REASONS: &str = "GetClaimIssueReasons";
pub const GET_CLAIM_AUDIT: &str = "GetClaimAudit";

// Addresses
pub const SELLER_ADDRESSES: &str = "SellerAddresses";

// Invoices
pub const SEND_INVOICE_LINK: &str = "SendInvoiceLink";
pub const DELETE_INVOICE_LINK: &str = "DeleteInvoiceLink";

// Common labels
pub const CREATE_COMMON_LABEL: &str = "CreateCommonLabel";
pub const GET_COMMON_LABEL: &str = "GetCommonLabel";

// Finance
pub const GET_SETTLEMENTS: &str = "GetSettlements";
pub const GET_CARGO_INVOICE_DETAILS: &str = "GetCargoInvoiceDetails";

// Member
pub const GET_COUNTRIES: &str = "GetCountries";
pub const GET_COUNTRY_CITIES: &str = "GetCountryCities";
pub const GET_DOMESTIC_CITIES: &str = "GetDomesticCities";

// Test environment
pub const CREATE_TEST_ORDER: &str = "CreateTestOrder";
pub const UPDATE_TEST_ORDER_STATUS: &str = "UpdateTestOrderStatus";
pub const TEST_CLAIM_WAITING_IN_ACTION: &str = "TestClaimWaitingInAction";

// Shipment
pub const GET_SHIPMENT_PROVIDERS: &str = "GetShipmentProviders";

/// Built-in path templates, keyed by operation.
pub const DEFAULT_ENDPOINTS: &[(&str, &str)] = &[
    (GET_PRODUCTS, "/integration/product/sellers/%s/products"),
    (CREATE_PRODUCTS, "/integration/product/sellers/%s/products"),
    (UPDATE_PRODUCTS, "/integration/product/sellers/%s/products"),
    (DELETE_PRODUCTS, "/integration/product/sellers/%s/products"),
    (
        GET_BATCH_REQUEST_RESULT,
        "/integration/product/sellers/%s/products/batch-requests/%s",
    ),
    (GET_BRANDS, "/integration/product/brands"),
    (GET_CATEGORIES, "/integration/product/product-categories"),
    (
        GET_CATEGORY_ATTRIBUTES,
        "/integration/product/product-categories/%d/attributes",
    ),
    (
        UPDATE_PRICE_INVENTORY,
        "/integration/inventory/sellers/%s/products/price-and-inventory",
    ),
    (GET_ORDERS, "/integration/order/sellers/%s/orders"),
    (
        UPDATE_PACKAGE_STATUS,
        "/integration/order/sellers/%s/shipment-packages/%d",
    ),
    (
        UPDATE_TRACKING_NUMBER,
        "/integration/order/sellers/%s/shipment-packages/%d/update-tracking-number",
    ),
    (
        CANCEL_PACKAGE_ITEMS,
        "/integration/order/sellers/%s/shipment-packages/%d/items/unsupplied",
    ),
    (
        SPLIT_PACKAGE,
        "/integration/order/sellers/%s/shipment-packages/%d/split",
    ),
    (
        MULTI_SPLIT_PACKAGE,
        "/integration/order/sellers/%s/shipment-packages/%d/multi-split",
    ),
    (
        QUANTITY_SPLIT_PACKAGE,
        "/integration/order/sellers/%s/shipment-packages/%d/quantity-split",
    ),
    (
        UPDATE_BOX_INFO,
        "/integration/order/sellers/%s/shipment-packages/%d/box-info",
    ),
    (
        ALTERNATIVE_DELIVERY,
        "/integration/order/sellers/%s/shipment-packages/%d/alternative-delivery",
    ),
    (MANUAL_DELIVER, "/integration/order/sellers/%s/manual-deliver/%s"),
    (MANUAL_RETURN, "/integration/order/sellers/%s/manual-return/%s"),
    (
        UPDATE_CARGO_PROVIDER,
        "/integration/order/sellers/%s/shipment-packages/%d/cargo-providers",
    ),
    (
        UPDATE_WAREHOUSE,
        "/integration/order/sellers/%s/shipment-packages/%d/warehouse",
    ),
    (
        EXTEND_DELIVERY_DATE,
        "/integration/order/sellers/%s/shipment-packages/%d/extended-agreed-delivery-date",
    ),
    (
        UPDATE_LABOR_COSTS,
        "/integration/order/sellers/%s/shipment-packages/%d/labor-costs",
    ),
    (
        DELIVERED_BY_SERVICE,
        "/integration/order/sellers/%s/shipment-packages/%d/delivered-by-service",
    ),
    (GET_CLAIMS, "/integration/order/sellers/%s/claims"),
    (
        APPROVE_CLAIM,
        "/integration/order/sellers/%s/claims/%s/items/approve",
    ),
    (REJECT_CLAIM, "/integration/order/sellers/%s/claims/%s/issue"),
    (GET_CLAIM_ISSUE_REASONS, "/integration/order/claim-issue-reasons"),
    (
        GET_CLAIM_AUDIT,
        "/integration/order/sellers/%s/claims/items/%s/audit",
    ),
    (SELLER_ADDRESSES, "/integration/sellers/%s/addresses"),
    (SEND_INVOICE_LINK, "/integration/sellers/%s/seller-invoice-links"),
    (
        DELETE_INVOICE_LINK,
        "/integration/sellers/%s/seller-invoice-links/delete",
    ),
    (CREATE_COMMON_LABEL, "/integration/sellers/%s/common-label/%s"),
    (GET_COMMON_LABEL, "/integration/sellers/%s/common-label/%s"),
    (GET_SETTLEMENTS, "/integration/finance/sellers/%s/settlements"),
    (
        GET_CARGO_INVOICE_DETAILS,
        "/integration/finance/sellers/%s/cargo-invoice-details/%s",
    ),
    (GET_COUNTRIES, "/integration/member/countries"),
    (GET_COUNTRY_CITIES, "/integration/member/countries/%s/cities"),
    (
        GET_DOMESTIC_CITIES,
        "/integration/member/countries/domestic/%s/cities",
    ),
    (CREATE_TEST_ORDER, "/integration/test/order/orders/core"),
    (
        UPDATE_TEST_ORDER_STATUS,
        "/integration/test/order/sellers/%s/shipment-packages/%d/status",
    ),
    (
        TEST_CLAIM_WAITING_IN_ACTION,
        "/integration/test/order/sellers/%s/claims/waiting-in-action",
    ),
    (GET_SHIPMENT_PROVIDERS, "/shipment-providers"),
];

/// Returns the built-in template for `key`.
#[must_use]
pub fn default_template(key: &str) -> Option<&'static str> {
    DEFAULT_ENDPOINTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, template)| *template)
}

/// A positional argument for a path template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathArg {
    /// Fills a `%s` placeholder.
    Str(String),
    /// Fills a `%d` placeholder.
    Int(i64),
}

impl fmt::Display for PathArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for PathArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PathArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for PathArg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for PathArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PathArg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for PathArg {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

/// Per-client view of the endpoint table.
///
/// Holds only the overrides; lookups fall back to [`DEFAULT_ENDPOINTS`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointRegistry {
    overrides: HashMap<String, String>,
}

impl EndpointRegistry {
    /// Creates a registry with the given overrides.
    #[must_use]
    pub const fn new(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Returns the template `key` resolves to, and whether it is a catalogued one.
    #[must_use]
    pub fn template<'a>(&'a self, key: &'a str) -> (&'a str, bool) {
        if let Some(template) = self.overrides.get(key) {
            return (template.as_str(), true);
        }
        match default_template(key) {
            Some(template) => (template, true),
            None => (key, false),
        }
    }

    /// Resolves `key` with positional `args` into a request path.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] when an overridden or built-in
    /// template does not match `args` in count or kind. The key-as-template
    /// fallback never fails.
    pub fn resolve(&self, key: &str, args: &[PathArg]) -> Result<String, InvalidHttpRequestError> {
        match self.template(key) {
            (template, true) => substitute(template, args),
            (template, false) => {
                tracing::debug!(key, "no endpoint template for key, using key as path");
                Ok(substitute_lenient(template, args))
            }
        }
    }

    /// Returns a copy of the merged table (built-ins shadowed by overrides).
    #[must_use]
    pub fn merged(&self) -> HashMap<String, String> {
        let mut merged: HashMap<String, String> = DEFAULT_ENDPOINTS
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        merged.extend(self.overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// Returns the overrides this registry was built with.
    #[must_use]
    pub const fn overrides(&self) -> &HashMap<String, String> {
        &self.overrides
    }
}

fn substitute(template: &str, args: &[PathArg]) -> Result<String, InvalidHttpRequestError> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut next = 0;
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let verb = match chars.next() {
            Some(verb) => verb,
            None => {
                out.push('%');
                break;
            }
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        let arg = args.get(next).ok_or_else(|| InvalidHttpRequestError::MissingArgument {
            template: template.to_string(),
            given: args.len(),
        })?;
        match (verb, arg) {
            ('s', PathArg::Str(s)) => out.push_str(s),
            ('d', PathArg::Int(n)) => out.push_str(&n.to_string()),
            ('s' | 'd', _) => {
                return Err(InvalidHttpRequestError::ArgumentType {
                    template: template.to_string(),
                    index: next,
                    expected: if verb == 's' { "a string" } else { "an integer" },
                })
            }
            _ => {
                return Err(InvalidHttpRequestError::UnsupportedPlaceholder {
                    template: template.to_string(),
                    verb,
                })
            }
        }
        next += 1;
    }

    if next < args.len() {
        return Err(InvalidHttpRequestError::UnusedArguments {
            template: template.to_string(),
            expected: next,
            given: args.len(),
        });
    }
    Ok(out)
}

fn substitute_lenient(template: &str, args: &[PathArg]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(verb @ ('s' | 'd')) => {
                chars.next();
                match args.next() {
                    Some(arg) => out.push_str(&arg.to_string()),
                    None => {
                        out.push('%');
                        out.push(verb);
                    }
                }
            }
            _ => out.push('%'),
        }
    }
    out
}
