//! Product catalog errors.

use thiserror::Error;

use crate::domain::products::models::ProductUuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(ProductUuid),

    #[error("product catalog unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur when loading a product feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read product feed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid product feed: {0}")]
    Parse(#[from] serde_json::Error),
}
