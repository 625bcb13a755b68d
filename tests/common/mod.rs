//! Shared helpers for cart integration tests.

#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rustc_hash::{FxHashMap, FxHashSet};
use tokio::sync::Notify;

use storefront_cart::domain::{
    carts::{
        CartStore,
        models::{NewLineItem, ShippingAddress},
    },
    pricing::{
        DeliveryPriceCalculator, LocalDeliveryCalculator, PricingError,
        models::{DeliveryQuote, DeliveryQuoteRequest},
    },
    products::{
        CatalogError, ProductCatalog,
        models::{ColorStock, Product, ProductUuid, SizeStock},
    },
};

/// A catalog whose products can be changed between refreshes, as the
/// server-side catalog would be.
#[derive(Debug, Default)]
pub struct SharedCatalog {
    products: RwLock<FxHashMap<ProductUuid, Product>>,
    failing: RwLock<FxHashSet<ProductUuid>>,
}

impl SharedCatalog {
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Arc<Self> {
        let catalog = Self::default();

        for product in products {
            catalog.put(product);
        }

        Arc::new(catalog)
    }

    /// Insert or replace a product.
    pub fn put(&self, product: Product) {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product.uuid, product);
    }

    /// Make lookups of a product fail.
    pub fn fail(&self, product: ProductUuid) {
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product);
    }
}

#[async_trait]
impl ProductCatalog for SharedCatalog {
    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogError> {
        if self
            .failing
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&product)
        {
            return Err(CatalogError::Unavailable("catalog offline".to_string()));
        }

        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&product)
            .cloned()
            .ok_or(CatalogError::NotFound(product))
    }
}

/// A catalog whose lookups wait at a gate until the test releases them.
#[derive(Debug)]
pub struct GatedCatalog {
    inner: Arc<SharedCatalog>,
    entered: Notify,
    release: Notify,
}

impl GatedCatalog {
    pub fn new(inner: Arc<SharedCatalog>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    /// Wait until a lookup is blocked at the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let one blocked lookup through.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ProductCatalog for GatedCatalog {
    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogError> {
        self.entered.notify_one();
        self.release.notified().await;

        self.inner.get_product(product).await
    }
}

/// Local pricing that yields to the scheduler before quoting, so concurrent
/// mutations interleave while a quote is in flight.
#[derive(Debug)]
pub struct SlowCalculator {
    inner: LocalDeliveryCalculator,
}

impl SlowCalculator {
    pub fn new() -> Result<Self, PricingError> {
        Ok(Self {
            inner: calculator()?,
        })
    }
}

#[async_trait]
impl DeliveryPriceCalculator for SlowCalculator {
    async fn quote(&self, request: DeliveryQuoteRequest) -> Result<DeliveryQuote, PricingError> {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        self.inner.quote(request).await
    }
}

/// Default delivery options with 15% tax.
pub fn calculator() -> Result<LocalDeliveryCalculator, PricingError> {
    LocalDeliveryCalculator::with_tax_rate(Decimal::new(15, 2))
}

/// A store over `catalog` using local pricing.
pub fn store_with(catalog: Arc<dyn ProductCatalog>) -> Result<CartStore, PricingError> {
    Ok(CartStore::new(Arc::new(calculator()?), catalog))
}

/// A product with stock for each `(color, size, count)` entry.
pub fn product(price: u64, stock: &[(&str, &str, u32)]) -> Product {
    let mut colors: Vec<ColorStock> = Vec::new();

    for &(color, size, count_in_stock) in stock {
        let size = SizeStock {
            size: size.to_string(),
            count_in_stock,
        };

        match colors.iter_mut().find(|entry| entry.color == color) {
            Some(entry) => entry.sizes.push(size),
            None => colors.push(ColorStock {
                color: color.to_string(),
                sizes: vec![size],
            }),
        }
    }

    Product {
        uuid: ProductUuid::new(),
        name: "Linen Shirt".to_string(),
        slug: "linen-shirt".to_string(),
        price,
        discounted_price: None,
        colors,
    }
}

/// The item a shopper submits for a variant of `product`.
pub fn item_for(product: &Product, color: &str, size: &str) -> NewLineItem {
    NewLineItem {
        product_uuid: product.uuid,
        name: product.name.clone(),
        slug: product.slug.clone(),
        image: format!("/images/{}.jpg", product.slug),
        color: color.to_string(),
        size: size.to_string(),
        price: product.price,
        discounted_price: product.discounted_price,
        colors: product.colors.clone(),
    }
}

pub fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Grace Hopper".to_string(),
        street: "1 Harbour Way".to_string(),
        city: "Arlington".to_string(),
        province: "VA".to_string(),
        postal_code: "22201".to_string(),
        country: "United States".to_string(),
        phone: "+1 555 0100".to_string(),
    }
}
