//! Product Models

use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
///
/// The authoritative catalog record a cart line item is reconciled against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub price: u64,
    pub discounted_price: Option<u64>,
    pub colors: Vec<ColorStock>,
}

impl Product {
    /// Discounted price when one is set, otherwise the list price.
    pub fn effective_price(&self) -> u64 {
        effective_price(self.price, self.discounted_price)
    }

    /// Units on hand for the given variant.
    pub fn count_in_stock(&self, color: &str, size: &str) -> u32 {
        count_in_stock(&self.colors, color, size)
    }
}

/// Stock levels of one color, broken down by size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorStock {
    pub color: String,
    pub sizes: Vec<SizeStock>,
}

/// Stock level of a single size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeStock {
    pub size: String,
    pub count_in_stock: u32,
}

/// Discounted price when one is set, otherwise the list price.
pub fn effective_price(price: u64, discounted_price: Option<u64>) -> u64 {
    discounted_price.unwrap_or(price)
}

/// Looks up the recorded stock for a color/size pair.
///
/// A variant with no stock record counts as zero available.
pub fn count_in_stock(colors: &[ColorStock], color: &str, size: &str) -> u32 {
    colors
        .iter()
        .find(|entry| entry.color == color)
        .and_then(|entry| entry.sizes.iter().find(|entry| entry.size == size))
        .map_or(0, |entry| entry.count_in_stock)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<ColorStock> {
        vec![
            ColorStock {
                color: "Red".to_string(),
                sizes: vec![
                    SizeStock {
                        size: "M".to_string(),
                        count_in_stock: 4,
                    },
                    SizeStock {
                        size: "L".to_string(),
                        count_in_stock: 0,
                    },
                ],
            },
            ColorStock {
                color: "Blue".to_string(),
                sizes: vec![SizeStock {
                    size: "M".to_string(),
                    count_in_stock: 9,
                }],
            },
        ]
    }

    #[test]
    fn count_in_stock_finds_variant() {
        assert_eq!(count_in_stock(&colors(), "Red", "M"), 4);
        assert_eq!(count_in_stock(&colors(), "Blue", "M"), 9);
    }

    #[test]
    fn count_in_stock_missing_variant_is_zero() {
        assert_eq!(count_in_stock(&colors(), "Red", "XL"), 0);
        assert_eq!(count_in_stock(&colors(), "Green", "M"), 0);
        assert_eq!(count_in_stock(&[], "Red", "M"), 0);
    }

    #[test]
    fn effective_price_prefers_discount() {
        let mut product = Product {
            uuid: ProductUuid::new(),
            name: "Tee".to_string(),
            slug: "tee".to_string(),
            price: 20_00,
            discounted_price: None,
            colors: colors(),
        };

        assert_eq!(product.effective_price(), 20_00);

        product.discounted_price = Some(15_00);

        assert_eq!(product.effective_price(), 15_00);
    }
}
