//! Pricing errors.

use thiserror::Error;

/// Errors raised while quoting cart totals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Amount arithmetic exceeded the range of minor units.
    #[error("price arithmetic overflowed")]
    Overflow,

    /// The requested delivery option does not exist (requested index, options available).
    #[error("delivery date {0} is not available ({1} options)")]
    UnknownDeliveryDate(usize, usize),

    /// The tax rate is negative.
    #[error("tax rate must not be negative")]
    InvalidTaxRate,

    /// No delivery options are configured.
    #[error("no delivery dates configured")]
    NoDeliveryDates,

    /// The remote price calculator could not be reached.
    #[error("price calculator unavailable: {0}")]
    Unavailable(String),
}
