//! Catalog backend client.
//!
//! # Architecture
//!
//! - The backend is the source of truth for products, variants, and carts;
//!   there is NO local sync and no local store - direct REST calls only
//! - Request URLs are built by `relikt_arte_core::url::ApiBase` (one
//!   canonical normalization policy)
//! - Every call is single-shot: no retries, no caching; failures are
//!   logged and propagated
//!
//! # Example
//!
//! ```rust,ignore
//! use relikt_arte_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(config.backend.api_base());
//!
//! // Get a product
//! let product = client.product(ProductId::new(5)).await?;
//!
//! // Add a line to a cart
//! let cart = client.create_cart().await?;
//! client.add_cart_line(cart.id, &NewCartLine::for_product(product.id)).await?;
//! ```

mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::*;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("Backend returned {status} for {path}")]
    Status { status: StatusCode, path: String },

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CatalogError {
    /// Whether this error means the resource simply does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("product/5".to_string());
        assert_eq!(err.to_string(), "Not found: product/5");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_status_error_display() {
        let err = CatalogError::Status {
            status: StatusCode::BAD_GATEWAY,
            path: "product/list".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Backend returned 502 Bad Gateway for product/list"
        );
        assert!(!err.is_not_found());
    }
}
