//! Domain types for the catalog backend.
//!
//! These are pass-through DTOs: their shapes are owned by the backend and
//! mirrored here without extra invariants. Unknown fields are ignored so
//! backend additions do not break deserialization.

use relikt_arte_core::{
    CartId, CartItemId, CategoryId, ColorId, GlassColorId, Price, ProductId, SizeId,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Products
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub price: Price,
    pub category_id: Option<CategoryId>,
    /// Product can be ordered with glass.
    #[serde(default)]
    pub have_glass: bool,
    /// Hinge side is configurable.
    #[serde(default)]
    pub orientation_choice: bool,
    /// Material is configurable.
    #[serde(default)]
    pub material_choice: bool,
    /// Platband kind is configurable.
    #[serde(default)]
    pub type_of_platband_choice: bool,
    pub description: Option<ProductDescription>,
    #[serde(default)]
    pub photos: Vec<ProductPhoto>,
}

impl Product {
    /// The photo shown first: the one flagged main, else the first one.
    #[must_use]
    pub fn main_photo(&self) -> Option<&ProductPhoto> {
        self.photos
            .iter()
            .find(|p| p.is_main)
            .or_else(|| self.photos.first())
    }
}

/// Free-text product description imported from catalog documents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDescription {
    pub summary: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
    pub covering: Option<String>,
}

/// A product photo, optionally tied to a variant selection.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPhoto {
    pub id: i32,
    /// Backend-relative path under the static-asset space.
    pub photo: String,
    #[serde(default)]
    pub is_main: bool,
    pub color_id: Option<ColorId>,
    pub size_id: Option<SizeId>,
    pub with_glass: Option<bool>,
}

impl ProductPhoto {
    /// Whether this photo depicts the given variant selection.
    #[must_use]
    pub fn matches_color(&self, color_id: ColorId) -> bool {
        self.color_id == Some(color_id)
    }
}

/// A product category.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub allowed_sizes: Option<Vec<SizeId>>,
}

/// A door leaf size.
#[derive(Debug, Clone, Deserialize)]
pub struct Size {
    pub id: SizeId,
    /// Display string, e.g. `2000x600х40` or `нестандартний`.
    pub dimensions: String,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

/// A leaf color.
#[derive(Debug, Clone, Deserialize)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
}

/// A glass color.
#[derive(Debug, Clone, Deserialize)]
pub struct GlassColor {
    pub id: GlassColorId,
    pub name: String,
}

// =============================================================================
// Pagination
// =============================================================================

/// Backend page envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub total: Option<i64>,
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub pages: Option<i64>,
}

/// List endpoints answer either a bare array or a page envelope,
/// depending on the backend route revision. Accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Page(Paginated<T>),
    Plain(Vec<T>),
}

impl<T> ListEnvelope<T> {
    /// The items, whichever shape they arrived in.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page(page) => page.items,
            Self::Plain(items) => items,
        }
    }
}

// =============================================================================
// Variant selections
// =============================================================================

/// Hinge side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Left,
    Right,
}

impl Orientation {
    /// Both sides, selector order.
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];

    /// Display label for selectors and card tags.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "Петлі зліва",
            Self::Right => "Петлі справа",
        }
    }

    /// The value as it travels in forms and request bodies.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Leaf material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Wood,
    Mdf,
}

impl Material {
    /// Both materials, selector order.
    pub const ALL: [Self; 2] = [Self::Wood, Self::Mdf];

    /// Display label for selectors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wood => "Деревина",
            Self::Mdf => "МДФ",
        }
    }

    /// The value as it travels in forms and request bodies.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Mdf => "mdf",
        }
    }
}

/// Platband kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatbandKind {
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "L-shaped")]
    LShaped,
}

impl PlatbandKind {
    /// Both kinds, selector order.
    pub const ALL: [Self; 2] = [Self::Default, Self::LShaped];

    /// Display label for selectors.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Звичайний",
            Self::LShaped => "Г-подібний",
        }
    }

    /// The value as it travels in forms and request bodies.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::LShaped => "L-shaped",
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A backend cart.
#[derive(Debug, Clone, Deserialize)]
pub struct Cart {
    pub id: CartId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total_value: Option<Price>,
}

impl Cart {
    /// Total number of items across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

/// A cart line with its product embedded by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product: Product,
    pub quantity: u32,
    pub color_id: Option<ColorId>,
    pub size_id: Option<SizeId>,
    #[serde(default)]
    pub with_glass: bool,
    pub glass_color_id: Option<GlassColorId>,
    pub orientation: Option<Orientation>,
    pub material: Option<Material>,
    pub type_of_platband: Option<PlatbandKind>,
    pub total_price: Option<Price>,
}

impl CartItem {
    /// Line total: backend value when present, else unit price x quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.total_price
            .unwrap_or_else(|| self.product.price.line_total(self.quantity))
    }
}

/// Input for a new cart line.
#[derive(Debug, Clone, Serialize)]
pub struct NewCartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<ColorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_id: Option<SizeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_glass: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glass_color_id: Option<GlassColorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_platband: Option<PlatbandKind>,
}

impl NewCartLine {
    /// A bare line for `product_id` with quantity 1 and no selections.
    #[must_use]
    pub const fn for_product(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: 1,
            color_id: None,
            size_id: None,
            with_glass: None,
            glass_color_id: None,
            orientation: None,
            material: None,
            type_of_platband: None,
        }
    }
}

/// Partial update for an existing cart line; only present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CartLinePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<ColorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_id: Option<SizeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_glass: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glass_color_id: Option<GlassColorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_platband: Option<PlatbandKind>,
}

impl CartLinePatch {
    /// Whether the patch carries any change at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.quantity.is_none()
            && self.color_id.is_none()
            && self.size_id.is_none()
            && self.with_glass.is_none()
            && self.glass_color_id.is_none()
            && self.orientation.is_none()
            && self.material.is_none()
            && self.type_of_platband.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_with_missing_flags() {
        let product: Product = serde_json::from_str(
            r#"{"id": 5, "sku": "DOOR-A-01", "name": "Модель А", "price": 50000}"#,
        )
        .unwrap();
        assert_eq!(product.id, ProductId::new(5));
        assert!(!product.have_glass);
        assert!(product.photos.is_empty());
        assert!(product.main_photo().is_none());
    }

    #[test]
    fn test_main_photo_prefers_flagged() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": 5, "sku": "DOOR-A-01", "name": "Модель А", "price": 50000,
                "photos": [
                    {"id": 1, "photo": "/static/catalog/door/a/1.jpg"},
                    {"id": 2, "photo": "/static/catalog/door/a/2.jpg", "is_main": true}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(product.main_photo().unwrap().id, 2);
    }

    #[test]
    fn test_list_envelope_accepts_both_shapes() {
        let plain: ListEnvelope<Color> =
            serde_json::from_str(r#"[{"id": 1, "name": "Білий"}]"#).unwrap();
        assert_eq!(plain.into_items().len(), 1);

        let page: ListEnvelope<Color> =
            serde_json::from_str(r#"{"items": [{"id": 1, "name": "Білий"}], "total": 1}"#).unwrap();
        assert_eq!(page.into_items().len(), 1);
    }

    #[test]
    fn test_orientation_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Orientation::Left).unwrap(),
            r#""left""#
        );
    }

    #[test]
    fn test_wire_names_match_serde() {
        for orientation in Orientation::ALL {
            let json = serde_json::to_string(&orientation).unwrap();
            assert_eq!(json, format!("\"{}\"", orientation.wire_name()));
        }
        for material in Material::ALL {
            let json = serde_json::to_string(&material).unwrap();
            assert_eq!(json, format!("\"{}\"", material.wire_name()));
        }
        for kind in PlatbandKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.wire_name()));
        }
    }

    #[test]
    fn test_platband_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&PlatbandKind::LShaped).unwrap(),
            r#""L-shaped""#
        );
        let parsed: PlatbandKind = serde_json::from_str(r#""default""#).unwrap();
        assert_eq!(parsed, PlatbandKind::Default);
    }

    #[test]
    fn test_new_cart_line_skips_absent_fields() {
        let line = NewCartLine::for_product(ProductId::new(5));
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"product_id": 5, "quantity": 1})
        );
    }

    #[test]
    fn test_cart_line_patch_is_empty() {
        assert!(CartLinePatch::default().is_empty());
        let patch = CartLinePatch {
            quantity: Some(2),
            ..CartLinePatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_line_total_falls_back_to_unit_price() {
        let item: CartItem = serde_json::from_str(
            r#"{
                "id": 9, "quantity": 2,
                "product": {"id": 5, "sku": "DOOR-A-01", "name": "Модель А", "price": 100}
            }"#,
        )
        .unwrap();
        assert_eq!(item.line_total(), Price::from_whole(200));
    }

    #[test]
    fn test_cart_total_quantity() {
        let cart: Cart = serde_json::from_str(
            r#"{
                "id": 1,
                "items": [
                    {"id": 9, "quantity": 2,
                     "product": {"id": 5, "sku": "A", "name": "А", "price": 100}},
                    {"id": 10, "quantity": 1,
                     "product": {"id": 6, "sku": "B", "name": "Б", "price": 100}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(cart.total_quantity(), 3);
    }
}
