//! Storefront Cart
//!
//! The client-side cart of a multi-locale storefront: a session cart store
//! with serialized mutations, stock and price reconciliation against the
//! product catalog, and the rules deciding when the cart sidebar is shown.

pub mod config;
pub mod domain;
pub mod observability;
pub mod sidebar;
pub mod storage;
pub mod uuids;

#[cfg(test)]
mod test;
