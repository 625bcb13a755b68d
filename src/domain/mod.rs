//! Storefront Domain Concerns

pub mod carts;
pub mod pricing;
pub mod products;
