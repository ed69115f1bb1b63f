//! Cart route handlers.
//!
//! The cart lives on the catalog backend; this module edits it line by
//! line. Mutations use HTMX fragments so the page updates without full
//! reloads. The cart id is kept in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use relikt_arte_core::{CartId, CartItemId, ColorId, GlassColorId, Price, ProductId, SizeId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::types::{
    Cart, CartItem, CartLinePatch, Material, NewCartLine, Orientation, PlatbandKind, Product,
};
use crate::catalog::CatalogError;
use crate::filters;
use crate::routes::{SelectOption, products};
use crate::state::AppState;

/// Session key holding the backend cart id.
const CART_ID_KEY: &str = "cart_id";

// =============================================================================
// View types
// =============================================================================

/// Cart line display data with its pre-resolved variant selectors.
#[derive(Clone)]
pub struct CartLineView {
    pub id: CartItemId,
    pub name: String,
    pub sku: String,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub quantity_minus: u32,
    pub quantity_plus: u32,
    pub line_total: Price,
    pub colors: Vec<SelectOption>,
    pub sizes: Vec<SelectOption>,
    /// Product can be ordered with glass at all.
    pub has_glass_option: bool,
    pub glass_presence: Vec<SelectOption>,
    /// Glass currently selected for this line.
    pub with_glass: bool,
    pub glass_colors: Vec<SelectOption>,
    pub show_orientation: bool,
    pub orientations: Vec<SelectOption>,
    pub show_material: bool,
    pub materials: Vec<SelectOption>,
    pub show_platband: bool,
    pub platbands: Vec<SelectOption>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Price,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total: Price::new(rust_decimal::Decimal::ZERO),
            item_count: 0,
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data. Absent selections fall back to the product's
/// defaults.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
    pub color_id: Option<ColorId>,
    pub size_id: Option<SizeId>,
    pub with_glass: Option<bool>,
    pub glass_color_id: Option<GlassColorId>,
    pub orientation: Option<Orientation>,
    pub material: Option<Material>,
    pub type_of_platband: Option<PlatbandKind>,
}

/// Update cart line form data. Only present fields are patched.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: CartItemId,
    pub quantity: Option<u32>,
    pub color_id: Option<ColorId>,
    pub size_id: Option<SizeId>,
    pub with_glass: Option<bool>,
    pub glass_color_id: Option<GlassColorId>,
    pub orientation: Option<Orientation>,
    pub material: Option<Material>,
    pub type_of_platband: Option<PlatbandKind>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: CartItemId,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Session helpers
// =============================================================================

/// Get the cart id from the session.
async fn get_cart_id(session: &Session) -> Option<CartId> {
    session.get::<CartId>(CART_ID_KEY).await.ok().flatten()
}

/// Set the cart id in the session.
async fn set_cart_id(
    session: &Session,
    cart_id: CartId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(CART_ID_KEY, cart_id).await
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = match get_cart_id(&session).await {
        Some(cart_id) => match state.catalog().cart(cart_id).await {
            Ok(cart) => build_cart_view(&state, &cart).await,
            Err(err) => {
                tracing::warn!(%cart_id, error = %err, "Failed to fetch cart");
                CartView::empty()
            }
        },
        None => CartView::empty(),
    };

    CartShowTemplate { cart }
}

/// Add a line to the cart (HTMX).
///
/// Creates a backend cart if the session has none. Returns the cart count
/// badge plus a trigger so other fragments refresh themselves.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    match add_line(&state, &session, &form).await {
        Ok(cart) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate {
                count: cart.total_quantity(),
            },
        )
            .into_response(),
        Err(err) => {
            tracing::error!(product_id = %form.product_id, error = %err, "Failed to add item to cart");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<span class=\"cart-error\">Не вдалося додати до кошика</span>"),
            )
                .into_response()
        }
    }
}

/// Update a cart line (HTMX). Returns the cart items fragment.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let Some(cart_id) = get_cart_id(&session).await else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    let mut patch = CartLinePatch {
        quantity: form.quantity.map(|q| q.max(1)),
        color_id: form.color_id,
        size_id: form.size_id,
        with_glass: form.with_glass,
        glass_color_id: form.glass_color_id,
        orientation: form.orientation,
        material: form.material,
        type_of_platband: form.type_of_platband,
    };
    // Turning glass off drops any glass color selection.
    if patch.with_glass == Some(false) {
        patch.glass_color_id = None;
    }

    if !patch.is_empty()
        && let Err(err) = state.catalog().update_cart_line(form.item_id, &patch).await
    {
        tracing::error!(item_id = %form.item_id, error = %err, "Failed to update cart line");
    }

    items_fragment(&state, cart_id).await
}

/// Remove a cart line (HTMX). Returns the cart items fragment.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let Some(cart_id) = get_cart_id(&session).await else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    if let Err(err) = state.catalog().remove_cart_line(form.item_id).await {
        tracing::error!(item_id = %form.item_id, error = %err, "Failed to remove cart line");
    }

    items_fragment(&state, cart_id).await
}

/// Get the cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let count = match get_cart_id(&session).await {
        Some(cart_id) => state
            .catalog()
            .cart(cart_id)
            .await
            .map(|cart| cart.total_quantity())
            .unwrap_or(0),
        None => 0,
    };

    CartCountTemplate { count }
}

// =============================================================================
// Internals
// =============================================================================

/// Fetch the product, fill unset selections with its defaults, and push
/// the line to the backend cart.
async fn add_line(
    state: &AppState,
    session: &Session,
    form: &AddToCartForm,
) -> Result<Cart, CatalogError> {
    let product = state.catalog().product(form.product_id).await?;
    let line = line_with_defaults(state, &product, form).await;

    let cart = ensure_cart(state, session).await?;
    state.catalog().add_cart_line(cart.id, &line).await
}

/// The session's backend cart, creating one when missing or stale.
async fn ensure_cart(state: &AppState, session: &Session) -> Result<Cart, CatalogError> {
    if let Some(cart_id) = get_cart_id(session).await {
        match state.catalog().cart(cart_id).await {
            Ok(cart) => return Ok(cart),
            Err(err) if err.is_not_found() => {
                tracing::warn!(%cart_id, "Session cart no longer exists; creating a new one");
            }
            Err(err) => return Err(err),
        }
    }

    let cart = state.catalog().create_cart().await?;
    if let Err(err) = set_cart_id(session, cart.id).await {
        tracing::error!(error = %err, "Failed to save cart id to session");
    }
    Ok(cart)
}

/// Fill a new line's unset selections with the product's defaults:
/// first color, default size, glass color when glass is on, left hinges,
/// wood, plain platband.
async fn line_with_defaults(
    state: &AppState,
    product: &Product,
    form: &AddToCartForm,
) -> NewCartLine {
    let with_glass = product
        .have_glass
        .then(|| form.with_glass.unwrap_or(true));

    let glass_color_id = if with_glass == Some(true) {
        match form.glass_color_id {
            Some(id) => Some(id),
            None => products::product_glass_colors(state, product)
                .await
                .first()
                .map(|color| color.id),
        }
    } else {
        None
    };

    let color_id = match form.color_id {
        Some(id) => Some(id),
        None => products::product_colors(state, product)
            .await
            .first()
            .map(|color| color.id),
    };

    let size_id = match form.size_id {
        Some(id) => Some(id),
        None => products::default_size_id(state, product).await,
    };

    NewCartLine {
        product_id: product.id,
        quantity: form.quantity.unwrap_or(1).max(1),
        color_id,
        size_id,
        with_glass,
        glass_color_id,
        orientation: form
            .orientation
            .or_else(|| product.orientation_choice.then_some(Orientation::Left)),
        material: form
            .material
            .or_else(|| product.material_choice.then_some(Material::Wood)),
        type_of_platband: form
            .type_of_platband
            .or_else(|| product.type_of_platband_choice.then_some(PlatbandKind::Default)),
    }
}

/// Re-fetch the cart and render the items fragment.
async fn items_fragment(state: &AppState, cart_id: CartId) -> Response {
    let cart = match state.catalog().cart(cart_id).await {
        Ok(cart) => build_cart_view(state, &cart).await,
        Err(err) => {
            tracing::warn!(%cart_id, error = %err, "Failed to fetch cart");
            CartView::empty()
        }
    };

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response()
}

/// Build the cart view with per-line selectors resolved.
pub async fn build_cart_view(state: &AppState, cart: &Cart) -> CartView {
    let mut lines = Vec::with_capacity(cart.items.len());
    for item in &cart.items {
        lines.push(build_line_view(state, item).await);
    }

    CartView {
        lines,
        total: cart
            .total_value
            .unwrap_or_else(|| cart.items.iter().map(CartItem::line_total).sum()),
        item_count: cart.total_quantity(),
    }
}

/// Build one line's view: image, prices, and selection-aware selectors.
async fn build_line_view(state: &AppState, item: &CartItem) -> CartLineView {
    let product = &item.product;

    let colors = products::product_colors(state, product).await;
    let sizes = products::product_sizes(state, product).await;
    let glass_colors = if product.have_glass {
        products::product_glass_colors(state, product).await
    } else {
        Vec::new()
    };

    let image_url = product
        .main_photo()
        .map(|photo| state.catalog().resource_url(&photo.photo));

    let orientation = item.orientation.unwrap_or(Orientation::Left);
    let material = item.material.unwrap_or(Material::Wood);
    let platband = item.type_of_platband.unwrap_or(PlatbandKind::Default);

    CartLineView {
        id: item.id,
        name: product.name.clone(),
        sku: product.sku.clone(),
        image_url,
        quantity: item.quantity,
        quantity_minus: item.quantity.saturating_sub(1).max(1),
        quantity_plus: item.quantity.saturating_add(1),
        line_total: item.line_total(),
        colors: colors
            .iter()
            .map(|c| {
                SelectOption::new(c.id.to_string(), c.name.clone(), item.color_id == Some(c.id))
            })
            .collect(),
        sizes: sizes
            .iter()
            .map(|s| {
                SelectOption::new(
                    s.id.to_string(),
                    s.dimensions.clone(),
                    item.size_id == Some(s.id),
                )
            })
            .collect(),
        has_glass_option: product.have_glass,
        glass_presence: products::glass_presence_options(item.with_glass),
        with_glass: item.with_glass,
        glass_colors: glass_colors
            .iter()
            .map(|c| {
                SelectOption::new(
                    c.id.to_string(),
                    c.name.clone(),
                    item.glass_color_id == Some(c.id),
                )
            })
            .collect(),
        show_orientation: product.orientation_choice,
        orientations: products::orientation_options(orientation),
        show_material: product.material_choice,
        materials: products::material_options(material),
        show_platband: product.type_of_platband_choice,
        platbands: products::platband_options(platband),
    }
}
