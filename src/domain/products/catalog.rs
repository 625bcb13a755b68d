//! Product catalog.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::products::{
    errors::CatalogError,
    models::{Product, ProductUuid},
};

/// Read access to authoritative product records.
#[automock]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Retrieve a single product with its current price and stock.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogError>;
}
