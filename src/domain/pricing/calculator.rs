//! Delivery price calculator.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::domain::pricing::{
    errors::PricingError,
    items_price,
    models::{DeliveryDate, DeliveryQuote, DeliveryQuoteRequest, default_delivery_dates},
};

/// Computes shipping, tax and totals for a set of cart items.
#[automock]
#[async_trait]
pub trait DeliveryPriceCalculator: Send + Sync {
    /// Quote the totals and delivery options for the given items.
    async fn quote(&self, request: DeliveryQuoteRequest) -> Result<DeliveryQuote, PricingError>;
}

/// Calculator backed by a fixed set of delivery options and a flat tax rate.
#[derive(Debug, Clone)]
pub struct LocalDeliveryCalculator {
    delivery_dates: Vec<DeliveryDate>,
    tax_rate: Decimal,
}

impl LocalDeliveryCalculator {
    /// Create a calculator with the given delivery options and tax rate.
    ///
    /// # Errors
    ///
    /// - [`PricingError::NoDeliveryDates`]: no delivery options were given.
    /// - [`PricingError::InvalidTaxRate`]: the tax rate is negative.
    pub fn new(delivery_dates: Vec<DeliveryDate>, tax_rate: Decimal) -> Result<Self, PricingError> {
        if delivery_dates.is_empty() {
            return Err(PricingError::NoDeliveryDates);
        }

        if tax_rate.is_sign_negative() {
            return Err(PricingError::InvalidTaxRate);
        }

        Ok(Self {
            delivery_dates,
            tax_rate,
        })
    }

    /// Create a calculator with the default delivery options and the given tax rate.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidTaxRate`] if the tax rate is negative.
    pub fn with_tax_rate(tax_rate: Decimal) -> Result<Self, PricingError> {
        Self::new(default_delivery_dates(), tax_rate)
    }

    /// The delivery option used when the cart has not chosen one: the slowest.
    pub fn default_delivery_date_index(&self) -> usize {
        self.delivery_dates.len().saturating_sub(1)
    }

    fn tax_on(&self, amount: u64) -> Result<u64, PricingError> {
        Decimal::from(amount)
            .checked_mul(self.tax_rate)
            .map(|tax| tax.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|tax| tax.to_u64())
            .ok_or(PricingError::Overflow)
    }
}

#[async_trait]
impl DeliveryPriceCalculator for LocalDeliveryCalculator {
    async fn quote(&self, request: DeliveryQuoteRequest) -> Result<DeliveryQuote, PricingError> {
        let items_price = items_price(&request.items)?;

        let index = request
            .delivery_date_index
            .unwrap_or_else(|| self.default_delivery_date_index());

        let delivery_date = self
            .delivery_dates
            .get(index)
            .ok_or(PricingError::UnknownDeliveryDate(index, self.delivery_dates.len()))?;

        let (shipping_price, tax_price) = if request.shipping_address.is_some() {
            let free_shipping = delivery_date.free_shipping_min_price > 0
                && items_price >= delivery_date.free_shipping_min_price;

            let shipping = if free_shipping {
                0
            } else {
                delivery_date.shipping_price
            };

            (Some(shipping), Some(self.tax_on(items_price)?))
        } else {
            (None, None)
        };

        let total_price = items_price
            .checked_add(shipping_price.unwrap_or(0))
            .and_then(|total| total.checked_add(tax_price.unwrap_or(0)))
            .ok_or(PricingError::Overflow)?;

        Ok(DeliveryQuote {
            items_price,
            shipping_price,
            tax_price,
            total_price,
            delivery_date_index: index,
            available_delivery_dates: self.delivery_dates.clone(),
        })
    }
}
