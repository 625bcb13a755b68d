//! Product feed catalog.
//!
//! Serves product lookups from a JSON export of the catalog, one array of
//! products, as published for offline reconciliation.

use std::path::Path;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::fs;

use crate::domain::products::{
    catalog::ProductCatalog,
    errors::{CatalogError, FeedError},
    models::{Product, ProductUuid},
};

/// Catalog backed by an in-memory product feed.
#[derive(Debug, Clone, Default)]
pub struct FeedCatalog {
    products: FxHashMap<ProductUuid, Product>,
}

impl FeedCatalog {
    /// Build a catalog from products; later duplicates replace earlier ones.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products
                .into_iter()
                .map(|product| (product.uuid, product))
                .collect(),
        }
    }

    /// Parse a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid product array.
    pub fn from_json(document: &str) -> Result<Self, FeedError> {
        let products: Vec<Product> = serde_json::from_str(document)?;

        Ok(Self::new(products))
    }

    /// Read a JSON product feed from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let document = fs::read_to_string(path).await?;

        Self::from_json(&document)
    }

    /// Number of products in the feed.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the feed has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductCatalog for FeedCatalog {
    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogError> {
        self.products
            .get(&product)
            .cloned()
            .ok_or(CatalogError::NotFound(product))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::fixtures::product_for;

    use super::*;

    #[tokio::test]
    async fn serves_products_from_json() -> TestResult {
        let product = product_for(ProductUuid::new(), 12_00, &[("Red", "M", 3)]);
        let document = serde_json::to_string(&[&product])?;

        let catalog = FeedCatalog::from_json(&document)?;

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_product(product.uuid).await?, product);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let catalog = FeedCatalog::default();
        let uuid = ProductUuid::new();

        let result = catalog.get_product(uuid).await;

        assert_eq!(result, Err(CatalogError::NotFound(uuid)));
    }

    #[test]
    fn from_json_rejects_invalid_feed() {
        let result = FeedCatalog::from_json(r#"{"products": []}"#);

        assert!(
            matches!(result, Err(FeedError::Parse(_))),
            "expected Parse error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn load_missing_file_is_io_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        let result = FeedCatalog::load(dir.path().join("missing.json")).await;

        assert!(
            matches!(result, Err(FeedError::Io(_))),
            "expected Io error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn load_reads_feed_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("products.json");
        let product = product_for(ProductUuid::new(), 5_00, &[("Blue", "S", 1)]);

        std::fs::write(&path, serde_json::to_string(&[&product])?)?;

        let catalog = FeedCatalog::load(&path).await?;

        assert!(!catalog.is_empty());

        Ok(())
    }
}
