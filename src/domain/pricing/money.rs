//! Money formatting

use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Errors raised when turning minor units into displayable money.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyFormatError {
    /// The ISO code is not a known currency.
    #[error("unknown currency code {0}")]
    UnknownCurrency(String),

    /// The amount does not fit the money representation.
    #[error("amount {0} is out of range")]
    OutOfRange(u64),
}

/// Resolves an ISO 4217 currency code such as `USD`.
///
/// # Errors
///
/// Returns [`MoneyFormatError::UnknownCurrency`] for unrecognised codes.
pub fn currency(code: &str) -> Result<&'static Currency, MoneyFormatError> {
    iso::find(&code.to_ascii_uppercase())
        .ok_or_else(|| MoneyFormatError::UnknownCurrency(code.to_string()))
}

/// Wraps an amount in minor units as money of the given currency.
///
/// # Errors
///
/// Returns [`MoneyFormatError::OutOfRange`] when the amount exceeds `i64`.
pub fn money(
    amount: u64,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, MoneyFormatError> {
    let minor = i64::try_from(amount).map_err(|_err| MoneyFormatError::OutOfRange(amount))?;

    Ok(Money::from_minor(minor, currency))
}

/// Formats an amount in minor units, e.g. `1250` in USD as `$12.50`.
///
/// # Errors
///
/// Returns [`MoneyFormatError::OutOfRange`] when the amount exceeds `i64`.
pub fn format_minor(amount: u64, currency: &'static Currency) -> Result<String, MoneyFormatError> {
    money(amount, currency).map(|money| money.to_string())
}
