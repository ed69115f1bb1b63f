//! Catalog backend client implementation.
//!
//! A thin layer over `reqwest`: build the URL, issue one request, decode
//! JSON, log-and-propagate failures. Typed endpoint methods all funnel
//! through the generic helpers so the policy lives in one place.

use std::sync::Arc;

use axum::http::StatusCode;
use relikt_arte_core::url::ApiBase;
use relikt_arte_core::{CartId, CartItemId, CategoryId, ProductId, SizeId};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::CatalogError;
use super::types::{
    Cart, CartItem, CartLinePatch, Category, Color, GlassColor, ListEnvelope, NewCartLine,
    Paginated, Product, Size,
};

/// How much of an unexpected response body ends up in the logs.
const LOGGED_BODY_LIMIT: usize = 500;

/// Client for the catalog backend REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    http: reqwest::Client,
    base: ApiBase,
}

impl CatalogClient {
    /// Create a new client against `base`.
    #[must_use]
    pub fn new(base: ApiBase) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                http: reqwest::Client::new(),
                base,
            }),
        }
    }

    /// The base address request URLs are built against.
    #[must_use]
    pub fn base(&self) -> &ApiBase {
        &self.inner.base
    }

    /// Absolute URL for a backend path (API or static-asset space).
    #[must_use]
    pub fn resource_url(&self, path: &str) -> String {
        self.inner.base.resource_url(path)
    }

    // =========================================================================
    // Generic helpers
    // =========================================================================

    /// Issue a single GET and decode the JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status (404 is
    /// reported as [`CatalogError::NotFound`]), or an undecodable body.
    /// Every failure is logged before it is returned; there are no
    /// retries and no fallback values.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        self.request(Method::GET, path, query, None).await
    }

    /// Issue a single request with an optional JSON body and decode the
    /// JSON payload.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T, CatalogError> {
        let text = self.request_text(method, path, query, body).await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                path,
                error = %e,
                body = %snippet(&text),
                "Failed to decode backend response"
            );
            CatalogError::Parse(e)
        })
    }

    /// Issue a single request where the response body does not matter.
    async fn request_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), CatalogError> {
        self.request_text(method, path, &[], body).await.map(|_| ())
    }

    /// Shared request path: build the URL, send, check the status, read
    /// the body as text.
    async fn request_text(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<String, CatalogError> {
        let url = self.inner.base.resource_url(path);

        let mut request = self.inner.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(%url, error = %e, "Backend request failed");
            CatalogError::Http(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::warn!(%url, "Backend resource not found");
            return Err(CatalogError::NotFound(path.to_string()));
        }

        let text = response.text().await?;
        if !status.is_success() {
            tracing::error!(
                %url,
                %status,
                body = %snippet(&text),
                "Backend returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                path: path.to_string(),
            });
        }

        Ok(text)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn product(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        self.get(&format!("product/{product_id}"), &[]).await
    }

    /// Get one page of the product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn products(&self, page: u32, per_page: u32) -> Result<Paginated<Product>, CatalogError> {
        self.get(
            "product/list",
            &[("page", page.to_string()), ("size", per_page.to_string())],
        )
        .await
    }

    /// Get a category by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist or the request fails.
    #[instrument(skip(self), fields(category_id = %category_id))]
    pub async fn category(&self, category_id: CategoryId) -> Result<Category, CatalogError> {
        self.get(&format!("product/category/{category_id}"), &[])
            .await
    }

    /// Get a size by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the size does not exist or the request fails.
    #[instrument(skip(self), fields(size_id = %size_id))]
    pub async fn size(&self, size_id: SizeId) -> Result<Size, CatalogError> {
        self.get(&format!("product/size/{size_id}"), &[]).await
    }

    /// List leaf colors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn colors(&self) -> Result<Vec<Color>, CatalogError> {
        let envelope: ListEnvelope<Color> = self
            .get("product/related/product_color/list", &[])
            .await?;
        Ok(envelope.into_items())
    }

    /// List glass colors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn glass_colors(&self) -> Result<Vec<GlassColor>, CatalogError> {
        let envelope: ListEnvelope<GlassColor> = self
            .get("product/related/product_glass_color/list", &[])
            .await?;
        Ok(envelope.into_items())
    }

    // =========================================================================
    // Cart (backend-owned; every mutation is single-shot)
    // =========================================================================

    /// Get an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart does not exist or the request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn cart(&self, cart_id: CartId) -> Result<Cart, CatalogError> {
        self.get(&format!("basket/{cart_id}"), &[]).await
    }

    /// Create a new empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<Cart, CatalogError> {
        self.request(Method::POST, "basket", &[], Some(serde_json::json!({})))
            .await
    }

    /// Add a line to a cart. Returns the updated cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart does not exist or the request fails.
    #[instrument(skip(self, line), fields(cart_id = %cart_id))]
    pub async fn add_cart_line(
        &self,
        cart_id: CartId,
        line: &NewCartLine,
    ) -> Result<Cart, CatalogError> {
        self.request(
            Method::POST,
            &format!("basket/{cart_id}/item"),
            &[],
            Some(serde_json::to_value(line)?),
        )
        .await
    }

    /// Patch a cart line. Returns the updated line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not exist or the request fails.
    #[instrument(skip(self, patch), fields(item_id = %item_id))]
    pub async fn update_cart_line(
        &self,
        item_id: CartItemId,
        patch: &CartLinePatch,
    ) -> Result<CartItem, CatalogError> {
        self.request(
            Method::PATCH,
            &format!("basket/item/{item_id}"),
            &[],
            Some(serde_json::to_value(patch)?),
        )
        .await
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not exist or the request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_cart_line(&self, item_id: CartItemId) -> Result<(), CatalogError> {
        self.request_unit(Method::DELETE, &format!("basket/item/{item_id}"), None)
            .await
    }
}

/// First [`LOGGED_BODY_LIMIT`] characters of a response body, for logging.
fn snippet(text: &str) -> String {
    text.chars().take(LOGGED_BODY_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_truncates() {
        let long = "x".repeat(LOGGED_BODY_LIMIT * 2);
        assert_eq!(snippet(&long).len(), LOGGED_BODY_LIMIT);
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn test_client_builds_urls_through_base() {
        let client = CatalogClient::new(ApiBase::new("https://example.com", false));
        assert_eq!(
            client.resource_url("product/5"),
            "https://example.com/api/v1/product/5/"
        );
        assert_eq!(
            client.resource_url("/static/catalog/door/a/1.jpg"),
            "https://example.com/static/catalog/door/a/1.jpg"
        );
    }
}
