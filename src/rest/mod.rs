//! Trendyol REST surface.
//!
//! - [`endpoints`]: the endpoint registry, mapping stable keys to path
//!   templates with positional placeholders, with per-key overrides
//! - [`Page`]: a page of a list endpoint
//! - [`ResourceError`]: the error type of every service operation
//! - [`resources`]: the per-domain services (products, orders, claims, ...)
//!
//! # Example
//!
//! ```rust
//! use trendyol_api::rest::endpoints::{EndpointRegistry, PathArg, UPDATE_PACKAGE_STATUS};
//!
//! let registry = EndpointRegistry::default();
//! let path = registry
//!     .resolve(UPDATE_PACKAGE_STATUS, &[PathArg::from("12345"), PathArg::from(987_i64)])
//!     .unwrap();
//! assert_eq!(path, "/integration/order/sellers/12345/shipment-packages/987");
//! ```

pub mod endpoints;
mod errors;
mod pagination;
pub(crate) mod query;
pub mod resources;

pub use endpoints::{EndpointRegistry, PathArg};
pub use errors::ResourceError;
pub use pagination::Page;
