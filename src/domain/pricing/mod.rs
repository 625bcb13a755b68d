//! Pricing
//!
//! Delivery options, totals calculation and money formatting for carts.

pub mod calculator;
pub mod errors;
pub mod models;
pub mod money;

pub use calculator::*;
pub use errors::PricingError;

use crate::domain::carts::models::CartLineItem;

/// Calculates the items price of a list of line items: the sum of each line's
/// effective price multiplied by its quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum does not fit in minor units.
pub fn items_price(items: &[CartLineItem]) -> Result<u64, PricingError> {
    items.iter().try_fold(0_u64, |acc, item| {
        item.line_total()
            .and_then(|total| acc.checked_add(total))
            .ok_or(PricingError::Overflow)
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::models::ProductUuid,
        test::fixtures::line_item,
    };

    use super::*;

    #[test]
    fn items_price_sums_effective_line_totals() -> TestResult {
        let mut discounted = line_item(ProductUuid::new(), "Red", "M", 2, 10_00);
        discounted.discounted_price = Some(7_50);

        let items = [discounted, line_item(ProductUuid::new(), "Blue", "L", 3, 2_00)];

        assert_eq!(items_price(&items)?, 21_00);

        Ok(())
    }

    #[test]
    fn items_price_empty_is_zero() -> TestResult {
        assert_eq!(items_price(&[])?, 0);

        Ok(())
    }

    #[test]
    fn items_price_overflow_errors() {
        let items = [
            line_item(ProductUuid::new(), "Red", "M", 1, u64::MAX),
            line_item(ProductUuid::new(), "Red", "L", 1, 1),
        ];

        assert!(matches!(items_price(&items), Err(PricingError::Overflow)));
    }
}
