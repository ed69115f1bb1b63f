//! Product route handlers.
//!
//! The listing renders door cards with tags derived from the product's
//! configuration flags; the detail page renders the photo gallery,
//! classified description lines, and the variant selectors.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use relikt_arte_core::{Price, ProductId, SizeId};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::types::{
    Color, GlassColor, Material, Orientation, PlatbandKind, Product, Size,
};
use crate::classify::{DetailLabel, classify_detail};
use crate::error::Result;
use crate::filters;
use crate::routes::SelectOption;
use crate::state::AppState;
use crate::{classify, defaults};

/// Products shown per listing page.
const PRODUCTS_PER_PAGE: u32 = 12;

// =============================================================================
// View types
// =============================================================================

/// Door card display data for the listing.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub price: Price,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
}

/// Photo display data for the gallery.
#[derive(Clone)]
pub struct PhotoView {
    pub url: String,
    pub is_main: bool,
}

/// A description line with its classified label, if any.
#[derive(Clone)]
pub struct DetailRowView {
    pub label: Option<&'static str>,
    pub text: String,
}

/// Product detail display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub price: Price,
    pub summary: String,
    pub details: Vec<DetailRowView>,
    pub photos: Vec<PhotoView>,
    pub have_glass: bool,
    pub orientation_choice: bool,
    pub material_choice: bool,
    pub platband_choice: bool,
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub colors: Vec<SelectOption>,
    pub sizes: Vec<SelectOption>,
    pub glass_colors: Vec<SelectOption>,
    pub glass_presence: Vec<SelectOption>,
    pub orientations: Vec<SelectOption>,
    pub materials: Vec<SelectOption>,
    pub platbands: Vec<SelectOption>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<ProductsIndexTemplate> {
    let current_page = query.page.unwrap_or(1).max(1);

    let listing = state
        .catalog()
        .products(current_page, PRODUCTS_PER_PAGE)
        .await?;

    let total_pages = listing
        .pages
        .and_then(|pages| u32::try_from(pages).ok())
        .unwrap_or(1)
        .max(1);

    let mut products = Vec::with_capacity(listing.items.len());
    for product in &listing.items {
        products.push(build_card(&state, product).await);
    }

    Ok(ProductsIndexTemplate {
        products,
        current_page,
        total_pages,
        prev_page: (current_page > 1).then(|| current_page - 1),
        next_page: (current_page < total_pages).then(|| current_page + 1),
    })
}

/// Display the product detail page.
///
/// An unknown id sends the visitor back to the listing.
#[instrument(skip(state), fields(product_id = %product_id))]
pub async fn show(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Response> {
    let product = match state.catalog().product(ProductId::new(product_id)).await {
        Ok(product) => product,
        Err(err) if err.is_not_found() => {
            return Ok(Redirect::to("/products").into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let sizes = size_options(&state, &product).await;
    let colors = color_options(&state, &product).await;
    let glass_colors = if product.have_glass {
        glass_color_options(&state, &product).await
    } else {
        Vec::new()
    };

    let template = ProductShowTemplate {
        product: build_detail(&state, product),
        colors,
        sizes,
        glass_colors,
        glass_presence: glass_presence_options(true),
        orientations: orientation_options(Orientation::Left),
        materials: material_options(Material::Wood),
        platbands: platband_options(PlatbandKind::Default),
    };

    Ok(template.into_response())
}

// =============================================================================
// Card building
// =============================================================================

/// Build the card view for one listing entry.
pub async fn build_card(state: &AppState, product: &Product) -> ProductCardView {
    let image_url = product
        .main_photo()
        .map(|photo| state.catalog().resource_url(&photo.photo));

    ProductCardView {
        id: product.id,
        sku: product.sku.clone(),
        name: product.name.clone(),
        price: product.price,
        image_url,
        tags: card_tags(state, product).await,
    }
}

/// Derive the card tags: glass presence, hinge side, default size.
async fn card_tags(state: &AppState, product: &Product) -> Vec<String> {
    let mut tags = Vec::new();

    if product.have_glass {
        tags.push("Скло присутнє".to_string());
    }
    if product.orientation_choice {
        tags.push(Orientation::Left.label().to_string());
    }
    if let Some(dimensions) = default_size_caption(state, product).await {
        tags.push(dimensions);
    }

    tags
}

/// The dimensions caption of the product's default size.
///
/// Door-category products use the fixed table; other categories resolve
/// the first allowed size through the backend. A lookup failure only
/// costs the tag.
async fn default_size_caption(state: &AppState, product: &Product) -> Option<String> {
    let category_id = product.category_id?;

    if defaults::uses_default_sizes(category_id) {
        return defaults::default_door_size().map(|size| size.dimensions.to_string());
    }

    let category = match state.catalog().category(category_id).await {
        Ok(category) => category,
        Err(err) => {
            tracing::warn!(%category_id, error = %err, "Failed to load category for size tag");
            return None;
        }
    };

    let size_id = *category.allowed_sizes.as_deref().unwrap_or_default().first()?;
    match state.catalog().size(size_id).await {
        Ok(size) => Some(size.dimensions),
        Err(err) => {
            tracing::warn!(%size_id, error = %err, "Failed to load size for size tag");
            None
        }
    }
}

/// The default size id submitted when the visitor made no explicit choice.
pub async fn default_size_id(state: &AppState, product: &Product) -> Option<SizeId> {
    let category_id = product.category_id?;

    if defaults::uses_default_sizes(category_id) {
        return defaults::default_door_size().map(|size| size.id);
    }

    match state.catalog().category(category_id).await {
        Ok(category) => category.allowed_sizes.as_deref().unwrap_or_default().first().copied(),
        Err(err) => {
            tracing::warn!(%category_id, error = %err, "Failed to load category for default size");
            None
        }
    }
}

// =============================================================================
// Detail building
// =============================================================================

/// Build the detail view: gallery (main photo first), summary, and
/// classified description rows.
fn build_detail(state: &AppState, product: Product) -> ProductDetailView {
    let mut photos: Vec<PhotoView> = product
        .photos
        .iter()
        .map(|photo| PhotoView {
            url: state.catalog().resource_url(&photo.photo),
            is_main: photo.is_main,
        })
        .collect();
    photos.sort_by_key(|photo| !photo.is_main);

    let description = product.description.unwrap_or_default();
    let summary = description
        .summary
        .unwrap_or_else(|| classify::summarize(&description.details));

    let details = description
        .details
        .iter()
        .enumerate()
        .map(|(position, line)| DetailRowView {
            label: classify_detail(line, position).map(DetailLabel::text),
            text: line.clone(),
        })
        .collect();

    ProductDetailView {
        id: product.id,
        sku: product.sku,
        name: product.name,
        price: product.price,
        summary,
        details,
        photos,
        have_glass: product.have_glass,
        orientation_choice: product.orientation_choice,
        material_choice: product.material_choice,
        platband_choice: product.type_of_platband_choice,
    }
}

// =============================================================================
// Selector options
// =============================================================================

/// Size options for a product; the first entry is pre-selected.
pub async fn size_options(state: &AppState, product: &Product) -> Vec<SelectOption> {
    let sizes = product_sizes(state, product).await;
    sizes
        .iter()
        .enumerate()
        .map(|(i, size)| SelectOption::new(size.id.to_string(), size.dimensions.clone(), i == 0))
        .collect()
}

/// The size list for a product: the fixed door table, or the category's
/// allowed sizes resolved through the backend.
pub async fn product_sizes(state: &AppState, product: &Product) -> Vec<Size> {
    let Some(category_id) = product.category_id else {
        return Vec::new();
    };

    if defaults::uses_default_sizes(category_id) {
        return defaults::default_sizes();
    }

    let category = match state.catalog().category(category_id).await {
        Ok(category) => category,
        Err(err) => {
            tracing::warn!(%category_id, error = %err, "Failed to load category sizes");
            return Vec::new();
        }
    };

    let mut sizes = Vec::new();
    for size_id in category.allowed_sizes.as_deref().unwrap_or_default() {
        match state.catalog().size(*size_id).await {
            Ok(size) => sizes.push(size),
            Err(err) => {
                tracing::warn!(size_id = %size_id, error = %err, "Failed to load allowed size");
            }
        }
    }
    sizes
}

/// Color options for a product; the first entry is pre-selected.
async fn color_options(state: &AppState, product: &Product) -> Vec<SelectOption> {
    let colors = product_colors(state, product).await;
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| SelectOption::new(color.id.to_string(), color.name.clone(), i == 0))
        .collect()
}

/// The color list for a product: the fixed door table, or the backend
/// color list.
pub async fn product_colors(state: &AppState, product: &Product) -> Vec<Color> {
    if product
        .category_id
        .is_some_and(defaults::uses_default_colors)
    {
        return defaults::default_colors();
    }

    state.catalog().colors().await.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Failed to load color list");
        Vec::new()
    })
}

/// Glass-color options for a product; the first entry is pre-selected.
async fn glass_color_options(state: &AppState, product: &Product) -> Vec<SelectOption> {
    let glass_colors = product_glass_colors(state, product).await;
    glass_colors
        .iter()
        .enumerate()
        .map(|(i, color)| SelectOption::new(color.id.to_string(), color.name.clone(), i == 0))
        .collect()
}

/// The glass-color list for a product: the fixed door table, or the
/// backend glass-color list.
pub async fn product_glass_colors(state: &AppState, product: &Product) -> Vec<GlassColor> {
    if product
        .category_id
        .is_some_and(defaults::uses_default_glass_colors)
    {
        return defaults::default_glass_colors();
    }

    state.catalog().glass_colors().await.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Failed to load glass color list");
        Vec::new()
    })
}

/// Glass presence options with the given pre-selection.
pub fn glass_presence_options(with_glass: bool) -> Vec<SelectOption> {
    vec![
        SelectOption::new("true", "Присутнє", with_glass),
        SelectOption::new("false", "Відсутнє", !with_glass),
    ]
}

/// Hinge-side options with the given pre-selection.
pub fn orientation_options(selected: Orientation) -> Vec<SelectOption> {
    Orientation::ALL
        .iter()
        .map(|o| SelectOption::new(o.wire_name(), o.label(), *o == selected))
        .collect()
}

/// Material options with the given pre-selection.
pub fn material_options(selected: Material) -> Vec<SelectOption> {
    Material::ALL
        .iter()
        .map(|m| SelectOption::new(m.wire_name(), m.label(), *m == selected))
        .collect()
}

/// Platband options with the given pre-selection.
pub fn platband_options(selected: PlatbandKind) -> Vec<SelectOption> {
    PlatbandKind::ALL
        .iter()
        .map(|p| SelectOption::new(p.wire_name(), p.label(), *p == selected))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glass_presence_options_preselect() {
        let options = glass_presence_options(true);
        assert!(options.iter().any(|o| o.value == "true" && o.selected));
        assert!(options.iter().any(|o| o.value == "false" && !o.selected));

        let options = glass_presence_options(false);
        assert!(options.iter().any(|o| o.value == "false" && o.selected));
    }

    #[test]
    fn test_orientation_options_preselect_left() {
        let options = orientation_options(Orientation::Left);
        let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.first().map(|o| o.value.as_str()), Some("left"));
    }

    #[test]
    fn test_material_and_platband_options() {
        let materials = material_options(Material::Wood);
        assert_eq!(materials.len(), 2);
        assert!(materials.iter().any(|o| o.value == "wood" && o.selected));

        let platbands = platband_options(PlatbandKind::Default);
        assert!(platbands.iter().any(|o| o.value == "default" && o.selected));
        assert!(platbands.iter().any(|o| o.value == "L-shaped" && !o.selected));
    }
}
