//! Cart Summary
//!
//! Renders a cart as a line item table followed by its totals.

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::domain::{
    carts::models::{Cart, CartLineItem},
    pricing::money::{MoneyFormatError, format_minor},
};

/// Errors that can occur when rendering a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// An amount could not be formatted.
    #[error(transparent)]
    Money(#[from] MoneyFormatError),

    /// Writing the output failed.
    #[error("failed to write cart summary: {0}")]
    Io(#[from] io::Error),
}

/// A cart paired with the currency its amounts are shown in.
#[derive(Debug)]
pub struct CartSummary<'a> {
    cart: &'a Cart,
    currency: &'static Currency,
}

impl<'a> CartSummary<'a> {
    /// Create a summary for the given cart.
    pub fn new(cart: &'a Cart, currency: &'static Currency) -> Self {
        Self { cart, currency }
    }

    /// Writes the summary table and totals.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be formatted or the output cannot
    /// be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        if self.cart.is_empty() {
            writeln!(out, "Cart is empty")?;
            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Variant", "Qty", "Price", "Line Total"]);

        for (idx, item) in self.cart.items.iter().enumerate() {
            builder.push_record(self.item_row(idx, item)?);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "\n{table}")?;

        self.write_totals(&mut out)
    }

    fn item_row(&self, idx: usize, item: &CartLineItem) -> Result<[String; 6], SummaryError> {
        let price = match item.discounted_price {
            Some(discounted) if discounted != item.price => format!(
                "{} (was {})",
                format_minor(discounted, self.currency)?,
                format_minor(item.price, self.currency)?
            ),
            _ => format_minor(item.effective_price(), self.currency)?,
        };

        let line_total = item
            .line_total()
            .map_or(Ok("overflow".to_string()), |total| {
                format_minor(total, self.currency)
            })?;

        Ok([
            format!("#{:<3}", idx + 1),
            item.name.clone(),
            format!("{} / {}", item.color, item.size),
            item.quantity.to_string(),
            price,
            line_total,
        ])
    }

    fn write_totals(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        let cart = self.cart;

        if let Some(date) = cart.delivery_date() {
            writeln!(out, " {:<10} {:>14}", "Delivery:", date.name)?;
        }

        let rows = [
            ("Items:", Some(cart.items_price)),
            ("Shipping:", cart.shipping_price),
            ("Tax:", cart.tax_price),
            ("Total:", Some(cart.total_price)),
        ];

        for (label, amount) in rows {
            let value = amount.map_or(Ok("--".to_string()), |amount| {
                format_minor(amount, self.currency)
            })?;

            writeln!(out, " {label:<10} {value:>14}")?;
        }

        writeln!(out)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{
        domain::{pricing::models::default_delivery_dates, products::models::ProductUuid},
        test::fixtures::line_item,
    };

    use super::*;

    #[test]
    fn write_to_renders_items_and_totals() -> TestResult {
        let mut discounted = line_item(ProductUuid::new(), "Blue", "L", 1, 30_00);
        discounted.name = "Hoodie".to_string();
        discounted.discounted_price = Some(25_00);

        let cart = Cart {
            items: vec![line_item(ProductUuid::new(), "Red", "M", 2, 10_00), discounted],
            items_price: 45_00,
            total_price: 45_00,
            ..Cart::default()
        };

        let mut out = Vec::new();
        CartSummary::new(&cart, iso::USD).write_to(&mut out)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Hoodie"), "missing item name:\n{output}");
        assert!(output.contains("Red / M"), "missing variant:\n{output}");
        assert!(output.contains("was"), "missing discount:\n{output}");
        assert!(output.contains("Total:"), "missing total:\n{output}");
        assert!(output.contains("--"), "missing placeholder for unquoted tax:\n{output}");
        assert!(!output.contains("Delivery:"), "unquoted cart has no delivery option:\n{output}");

        Ok(())
    }

    #[test]
    fn write_to_empty_cart() -> TestResult {
        let mut out = Vec::new();
        CartSummary::new(&Cart::default(), iso::USD).write_to(&mut out)?;

        assert_eq!(String::from_utf8(out)?, "Cart is empty\n");

        Ok(())
    }

    #[test]
    fn write_to_names_chosen_delivery_option() -> TestResult {
        let cart = Cart {
            items: vec![line_item(ProductUuid::new(), "Red", "M", 1, 10_00)],
            items_price: 10_00,
            total_price: 10_00,
            delivery_date_index: Some(0),
            available_delivery_dates: default_delivery_dates(),
            ..Cart::default()
        };

        let mut out = Vec::new();
        CartSummary::new(&cart, iso::USD).write_to(&mut out)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Delivery:"), "missing delivery row:\n{output}");
        assert!(output.contains("Tomorrow"), "missing delivery option:\n{output}");

        Ok(())
    }
}
