//! Cart Models

use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        pricing::models::{DeliveryDate, DeliveryQuote},
        products::models::{ColorStock, ProductUuid, count_in_stock, effective_price},
    },
    uuids::TypedUuid,
};

/// Line Item UUID
pub type LineItemUuid = TypedUuid<CartLineItem>;

/// Cart Model
///
/// Items keep insertion order. Totals are whatever the last delivery quote
/// returned for the current items, address and delivery date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartLineItem>,
    pub items_price: u64,
    pub tax_price: Option<u64>,
    pub shipping_price: Option<u64>,
    pub total_price: u64,
    pub shipping_address: Option<ShippingAddress>,
    pub payment_method: Option<PaymentMethod>,
    pub delivery_date_index: Option<usize>,

    /// Delivery options offered by the last quote.
    #[serde(default)]
    pub available_delivery_dates: Vec<DeliveryDate>,
}

impl Cart {
    /// Check if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Find the line for a product variant.
    pub fn find(&self, key: &LineItemKey) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.is_variant(key))
    }

    /// Find a line by its client-assigned id.
    pub fn line(&self, uuid: LineItemUuid) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.uuid == uuid)
    }

    pub(crate) fn apply_quote(&mut self, quote: DeliveryQuote) {
        self.items_price = quote.items_price;
        self.tax_price = quote.tax_price;
        self.shipping_price = quote.shipping_price;
        self.total_price = quote.total_price;
        self.delivery_date_index = Some(quote.delivery_date_index);
        self.available_delivery_dates = quote.available_delivery_dates;
    }

    /// The chosen delivery option, once the cart has been quoted.
    pub fn delivery_date(&self) -> Option<&DeliveryDate> {
        self.delivery_date_index
            .and_then(|index| self.available_delivery_dates.get(index))
    }

    pub(crate) fn reset_totals(&mut self) {
        self.items_price = 0;
        self.tax_price = None;
        self.shipping_price = None;
        self.total_price = 0;
    }
}

/// CartLineItem Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub uuid: LineItemUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub price: u64,
    pub discounted_price: Option<u64>,
    pub colors: Vec<ColorStock>,
}

impl CartLineItem {
    pub(crate) fn from_new(item: NewLineItem, quantity: u32) -> Self {
        Self {
            uuid: LineItemUuid::new(),
            product_uuid: item.product_uuid,
            name: item.name,
            slug: item.slug,
            image: item.image,
            color: item.color,
            size: item.size,
            quantity,
            price: item.price,
            discounted_price: item.discounted_price,
            colors: item.colors,
        }
    }

    /// Discounted price when one is set, otherwise the list price.
    pub fn effective_price(&self) -> u64 {
        effective_price(self.price, self.discounted_price)
    }

    /// Effective price multiplied by quantity, `None` on overflow.
    pub fn line_total(&self) -> Option<u64> {
        self.effective_price().checked_mul(u64::from(self.quantity))
    }

    /// Units on hand for this line's variant, per the cached stock levels.
    pub fn count_in_stock(&self) -> u32 {
        count_in_stock(&self.colors, &self.color, &self.size)
    }

    /// The variant key of this line.
    pub fn key(&self) -> LineItemKey {
        LineItemKey {
            product_uuid: self.product_uuid,
            color: self.color.clone(),
            size: self.size.clone(),
        }
    }

    /// Check if this line holds the given product variant.
    pub fn is_variant(&self, key: &LineItemKey) -> bool {
        self.product_uuid == key.product_uuid && self.color == key.color && self.size == key.size
    }
}

/// A product variant as submitted by a shopper, before it becomes a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub color: String,
    pub size: String,
    pub price: u64,
    pub discounted_price: Option<u64>,
    pub colors: Vec<ColorStock>,
}

impl NewLineItem {
    /// The variant key of this item.
    pub fn key(&self) -> LineItemKey {
        LineItemKey {
            product_uuid: self.product_uuid,
            color: self.color.clone(),
            size: self.size.clone(),
        }
    }

    /// Units on hand for this item's variant.
    pub fn count_in_stock(&self) -> u32 {
        count_in_stock(&self.colors, &self.color, &self.size)
    }
}

/// Uniqueness key of a cart line: (product, color, size).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineItemKey {
    pub product_uuid: ProductUuid,
    pub color: String,
    pub size: String,
}

/// Shipping Address Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

/// Payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "PayPal")]
    PayPal,

    #[serde(rename = "Stripe")]
    Stripe,

    #[serde(rename = "Cash On Delivery")]
    CashOnDelivery,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::fixtures::{new_line_item, tee_colors};

    use super::*;

    #[test]
    fn line_total_uses_effective_price() {
        let mut item = CartLineItem::from_new(new_line_item(ProductUuid::new(), "Red", "M"), 3);

        item.price = 10_00;
        item.discounted_price = Some(8_00);

        assert_eq!(item.line_total(), Some(24_00));
    }

    #[test]
    fn line_total_overflow_is_none() {
        let mut item = CartLineItem::from_new(new_line_item(ProductUuid::new(), "Red", "M"), 2);

        item.price = u64::MAX;

        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn is_variant_requires_product_color_and_size() {
        let product = ProductUuid::new();
        let item = CartLineItem::from_new(new_line_item(product, "Red", "M"), 1);

        assert!(item.is_variant(&new_line_item(product, "Red", "M").key()));
        assert!(!item.is_variant(&new_line_item(product, "Blue", "M").key()));
        assert!(!item.is_variant(&new_line_item(product, "Red", "L").key()));
        assert!(!item.is_variant(&new_line_item(ProductUuid::new(), "Red", "M").key()));
    }

    #[test]
    fn count_in_stock_reads_cached_colors() {
        let item = CartLineItem {
            colors: tee_colors(2),
            ..CartLineItem::from_new(new_line_item(ProductUuid::new(), "Red", "M"), 1)
        };

        assert_eq!(item.count_in_stock(), 2);
    }

    #[test]
    fn cart_round_trips_through_json() -> TestResult {
        let mut cart = Cart::default();

        cart.items.push(CartLineItem::from_new(
            new_line_item(ProductUuid::new(), "Red", "M"),
            2,
        ));
        cart.payment_method = Some(PaymentMethod::CashOnDelivery);

        let json = serde_json::to_string(&cart)?;

        assert!(json.contains("\"itemsPrice\""), "expected camelCase keys: {json}");
        assert!(json.contains("\"Cash On Delivery\""), "unexpected payment method: {json}");

        let restored: Cart = serde_json::from_str(&json)?;

        assert_eq!(restored, cart);

        Ok(())
    }

    #[test]
    fn item_count_sums_quantities() {
        let mut cart = Cart::default();

        cart.items.push(CartLineItem::from_new(
            new_line_item(ProductUuid::new(), "Red", "M"),
            2,
        ));
        cart.items.push(CartLineItem::from_new(
            new_line_item(ProductUuid::new(), "Red", "M"),
            3,
        ));

        assert_eq!(cart.item_count(), 5);
        assert!(!cart.is_empty());
    }
}
