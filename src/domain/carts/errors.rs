//! Cart store errors.

use thiserror::Error;

use crate::domain::pricing::PricingError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be at least one")]
    InvalidQuantity,

    #[error("insufficient stock: {requested} requested, {available} available")]
    InsufficientStock { available: u32, requested: u64 },

    #[error("failed to price cart: {0}")]
    Pricing(#[from] PricingError),
}
