//! Default variant tables for door-category products.
//!
//! The door category predates the backend's per-category size and color
//! lists, so its variants are fixed tables shipped with the storefront.
//! Other categories load their lists from the backend. The tables are
//! versioned configuration - edit them here, never inline.

use relikt_arte_core::{CategoryId, ColorId, GlassColorId, SizeId};

use crate::catalog::types::{Color, GlassColor, Size};

/// Categories whose size list is the fixed door table.
pub const CATEGORIES_WITH_DEFAULT_SIZES: &[CategoryId] = &[CategoryId::new(1)];

/// Categories whose color list is the fixed door table.
pub const CATEGORIES_WITH_DEFAULT_COLORS: &[CategoryId] = &[CategoryId::new(1)];

/// Categories whose glass-color list is the fixed door table.
pub const CATEGORIES_WITH_DEFAULT_GLASS_COLORS: &[CategoryId] = &[CategoryId::new(1)];

/// A fixed door size.
pub struct DefaultSize {
    pub id: SizeId,
    pub dimensions: &'static str,
    pub width: i32,
    pub height: i32,
}

/// Standard door leaf sizes; the first entry is the pre-selected default.
pub const DEFAULT_DOOR_SIZES: &[DefaultSize] = &[
    DefaultSize {
        id: SizeId::new(1),
        dimensions: "2000x600х40",
        width: 600,
        height: 2000,
    },
    DefaultSize {
        id: SizeId::new(2),
        dimensions: "2000x700х40",
        width: 700,
        height: 2000,
    },
    DefaultSize {
        id: SizeId::new(3),
        dimensions: "2000x800х40",
        width: 800,
        height: 2000,
    },
    DefaultSize {
        id: SizeId::new(4),
        dimensions: "2000x900х40",
        width: 900,
        height: 2000,
    },
    DefaultSize {
        id: SizeId::new(5),
        dimensions: "нестандартний",
        width: 0,
        height: 0,
    },
];

/// Default door leaf colors.
pub const DEFAULT_DOOR_COLORS: &[(ColorId, &str)] = &[
    (ColorId::new(1), "Білий"),
    (ColorId::new(2), "Сірий"),
    (ColorId::new(3), "Чорний"),
    (ColorId::new(4), "Горіх"),
    (ColorId::new(5), "Дуб"),
    (ColorId::new(6), "Венге"),
    (ColorId::new(7), "Ясен"),
    (ColorId::new(8), "Бук"),
];

/// Default door glass colors.
pub const DEFAULT_GLASS_COLORS: &[(GlassColorId, &str)] = &[
    (GlassColorId::new(1), "Сатин"),
    (GlassColorId::new(2), "Матовий"),
    (GlassColorId::new(3), "Сатин Матовий"),
    (GlassColorId::new(4), "Глянець"),
    (GlassColorId::new(5), "Бронза"),
    (GlassColorId::new(6), "Прозоре"),
    (GlassColorId::new(7), "Тоноване"),
];

/// Whether `category_id` uses the fixed size table.
#[must_use]
pub fn uses_default_sizes(category_id: CategoryId) -> bool {
    CATEGORIES_WITH_DEFAULT_SIZES.contains(&category_id)
}

/// Whether `category_id` uses the fixed color table.
#[must_use]
pub fn uses_default_colors(category_id: CategoryId) -> bool {
    CATEGORIES_WITH_DEFAULT_COLORS.contains(&category_id)
}

/// Whether `category_id` uses the fixed glass-color table.
#[must_use]
pub fn uses_default_glass_colors(category_id: CategoryId) -> bool {
    CATEGORIES_WITH_DEFAULT_GLASS_COLORS.contains(&category_id)
}

/// The fixed size table as backend-shaped values.
#[must_use]
pub fn default_sizes() -> Vec<Size> {
    DEFAULT_DOOR_SIZES
        .iter()
        .map(|size| Size {
            id: size.id,
            dimensions: size.dimensions.to_string(),
            width: size.width,
            height: size.height,
        })
        .collect()
}

/// The fixed color table as backend-shaped values.
#[must_use]
pub fn default_colors() -> Vec<Color> {
    DEFAULT_DOOR_COLORS
        .iter()
        .map(|&(id, name)| Color {
            id,
            name: name.to_string(),
        })
        .collect()
}

/// The fixed glass-color table as backend-shaped values.
#[must_use]
pub fn default_glass_colors() -> Vec<GlassColor> {
    DEFAULT_GLASS_COLORS
        .iter()
        .map(|&(id, name)| GlassColor {
            id,
            name: name.to_string(),
        })
        .collect()
}

/// The pre-selected door size.
#[must_use]
pub fn default_door_size() -> Option<&'static DefaultSize> {
    DEFAULT_DOOR_SIZES.first()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_door_category_uses_defaults() {
        let door = CategoryId::new(1);
        assert!(uses_default_sizes(door));
        assert!(uses_default_colors(door));
        assert!(uses_default_glass_colors(door));

        let other = CategoryId::new(2);
        assert!(!uses_default_sizes(other));
    }

    #[test]
    fn test_default_door_size_is_smallest_standard() {
        let size = default_door_size().expect("table is non-empty");
        assert_eq!(size.dimensions, "2000x600х40");
        assert_eq!(size.width, 600);
    }

    #[test]
    fn test_tables_convert_to_backend_shapes() {
        assert_eq!(default_sizes().len(), DEFAULT_DOOR_SIZES.len());
        assert_eq!(default_colors().len(), DEFAULT_DOOR_COLORS.len());
        assert_eq!(default_glass_colors().len(), DEFAULT_GLASS_COLORS.len());
    }
}
