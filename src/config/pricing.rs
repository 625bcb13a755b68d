//! Pricing Config

use clap::Args;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::domain::pricing::{
    LocalDeliveryCalculator, PricingError,
    money::{MoneyFormatError, currency},
};

/// Totals settings.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// Tax rate applied to the items price once an address is known
    #[arg(long, env = "CART_TAX_RATE", default_value = "0.15")]
    pub tax_rate: Decimal,

    /// ISO 4217 code amounts are shown in
    #[arg(long, env = "CART_CURRENCY", default_value = "USD")]
    pub currency: String,
}

impl PricingConfig {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not a known currency.
    pub fn currency(&self) -> Result<&'static Currency, MoneyFormatError> {
        currency(&self.currency)
    }

    /// Calculator with the default delivery options and the configured tax rate.
    ///
    /// # Errors
    ///
    /// Returns an error if the tax rate is negative.
    pub fn calculator(&self) -> Result<LocalDeliveryCalculator, PricingError> {
        LocalDeliveryCalculator::with_tax_rate(self.tax_rate)
    }
}
