//! Products

pub mod catalog;
pub mod errors;
pub mod feed;
pub mod models;

pub use catalog::*;
pub use errors::{CatalogError, FeedError};
pub use feed::FeedCatalog;
