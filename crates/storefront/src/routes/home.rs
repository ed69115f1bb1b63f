//! Home page route handler.

use axum::response::Redirect;

/// The storefront front page is the product listing.
pub async fn home() -> Redirect {
    Redirect::to("/products")
}
