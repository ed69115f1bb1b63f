//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are hryvnia amounts. The backend serializes them as plain
//! JSON numbers; `rust_decimal`'s deserializer accepts numbers and strings,
//! so the wrapper stays transparent on the wire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A hryvnia amount.
///
/// `Display` prints the bare amount; currency decoration (`"… ₴"`) is a
/// template concern handled by the `hryvnia` filter in the storefront.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole-hryvnia amount.
    #[must_use]
    pub fn from_whole(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of a line of `quantity` items at this unit price.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Whole amounts print without a fractional part ("4500", not "4500.00")
        if self.0.is_integer() {
            write!(f, "{}", self.0.trunc())
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), std::ops::Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_whole() {
        assert_eq!(Price::from_whole(4500).to_string(), "4500");
    }

    #[test]
    fn test_price_display_fractional() {
        let price = Price::new(Decimal::new(450050, 2));
        assert_eq!(price.to_string(), "4500.50");
    }

    #[test]
    fn test_price_deserializes_from_number() {
        let price: Price = serde_json::from_str("50000").unwrap();
        assert_eq!(price, Price::from_whole(50000));
    }

    #[test]
    fn test_line_total() {
        assert_eq!(Price::from_whole(100).line_total(3), Price::from_whole(300));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_whole(10), Price::from_whole(20)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_whole(30));
    }
}
