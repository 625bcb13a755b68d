//! Pricing Models

use serde::{Deserialize, Serialize};

use crate::domain::carts::models::{CartLineItem, ShippingAddress};

/// A delivery option offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDate {
    pub name: String,
    pub days_to_deliver: u32,
    pub shipping_price: u64,

    /// Items price from which shipping is free; zero disables free shipping.
    pub free_shipping_min_price: u64,
}

/// Input of a delivery quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryQuoteRequest {
    pub items: Vec<CartLineItem>,
    pub shipping_address: Option<ShippingAddress>,
    pub delivery_date_index: Option<usize>,
}

/// Totals and delivery options for a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryQuote {
    pub items_price: u64,
    pub shipping_price: Option<u64>,
    pub tax_price: Option<u64>,
    pub total_price: u64,
    pub delivery_date_index: usize,
    pub available_delivery_dates: Vec<DeliveryDate>,
}

/// The delivery options used when none are configured.
pub fn default_delivery_dates() -> Vec<DeliveryDate> {
    vec![
        DeliveryDate {
            name: "Tomorrow".to_string(),
            days_to_deliver: 1,
            shipping_price: 12_90,
            free_shipping_min_price: 0,
        },
        DeliveryDate {
            name: "Next 3 Days".to_string(),
            days_to_deliver: 3,
            shipping_price: 6_90,
            free_shipping_min_price: 0,
        },
        DeliveryDate {
            name: "Next 5 Days".to_string(),
            days_to_deliver: 5,
            shipping_price: 4_90,
            free_shipping_min_price: 35_00,
        },
    ]
}
