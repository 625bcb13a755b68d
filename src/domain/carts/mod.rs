//! Carts

pub mod errors;
pub mod models;
pub mod observers;
pub mod refresh;
pub mod store;
pub mod summary;

pub use errors::CartError;
pub use store::CartStore;
