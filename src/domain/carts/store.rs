//! Cart store.
//!
//! The single source of truth for a session's cart. Every mutation holds the
//! store across its read, its delivery quote and its write, so mutations are
//! applied one at a time in the order they were issued.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use rustc_hash::FxHashSet;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::{
    carts::{
        errors::CartError,
        models::{
            Cart, CartLineItem, LineItemKey, LineItemUuid, NewLineItem, PaymentMethod,
            ShippingAddress,
        },
        observers::CartObserver,
        refresh::{PriceRefresh, StockRefresh, apply_prices, apply_stock, fetch_products},
    },
    pricing::{DeliveryPriceCalculator, models::DeliveryQuoteRequest},
    products::{ProductCatalog, models::ProductUuid},
};

/// Session cart state container.
pub struct CartStore {
    cart: Mutex<Cart>,
    calculator: Arc<dyn DeliveryPriceCalculator>,
    catalog: Arc<dyn ProductCatalog>,
    observers: Vec<Arc<dyn CartObserver>>,
}

impl Debug for CartStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a store holding an empty cart.
    #[must_use]
    pub fn new(
        calculator: Arc<dyn DeliveryPriceCalculator>,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Self {
        Self {
            cart: Mutex::new(Cart::default()),
            calculator,
            catalog,
            observers: Vec::new(),
        }
    }

    /// Start from a previously persisted cart.
    #[must_use]
    pub fn with_cart(mut self, cart: Cart) -> Self {
        self.cart = Mutex::new(cart);
        self
    }

    /// Register an observer notified on every commit.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn CartObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// A copy of the current aggregate.
    pub async fn snapshot(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Add `quantity` units of a product variant, merging with an existing
    /// line for the same (product, color, size). A merged line records the
    /// submitted item's stock levels.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::InsufficientStock`]: the line would exceed the variant's stock.
    /// - [`CartError::Pricing`]: the totals could not be quoted.
    pub async fn add_item(
        &self,
        item: NewLineItem,
        quantity: u32,
    ) -> Result<LineItemUuid, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();

        let available = item.count_in_stock();
        let key = item.key();

        let uuid = if let Some(line) = next.items.iter_mut().find(|line| line.is_variant(&key)) {
            let requested = u64::from(line.quantity) + u64::from(quantity);

            if requested > u64::from(available) {
                return Err(CartError::InsufficientStock {
                    available,
                    requested,
                });
            }

            // Bounded by `available` above.
            line.quantity += quantity;
            line.colors.clone_from(&item.colors);

            line.uuid
        } else {
            if quantity > available {
                return Err(CartError::InsufficientStock {
                    available,
                    requested: u64::from(quantity),
                });
            }

            let line = CartLineItem::from_new(item, quantity);
            let uuid = line.uuid;

            next.items.push(line);

            uuid
        };

        self.requote_and_commit(&mut cart, next).await?;

        Ok(uuid)
    }

    /// Set the absolute quantity of an existing line. Missing lines are ignored.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::InsufficientStock`]: `quantity` exceeds the line's recorded stock.
    /// - [`CartError::Pricing`]: the totals could not be quoted.
    pub async fn update_item(&self, key: &LineItemKey, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();

        let Some(line) = next.items.iter_mut().find(|line| line.is_variant(key)) else {
            debug!(product = %key.product_uuid, "update of missing cart line ignored");
            return Ok(());
        };

        let available = line.count_in_stock();

        if quantity > available {
            return Err(CartError::InsufficientStock {
                available,
                requested: u64::from(quantity),
            });
        }

        line.quantity = quantity;

        self.requote_and_commit(&mut cart, next).await
    }

    /// Remove a line. Missing lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if the totals could not be quoted.
    pub async fn remove_item(&self, key: &LineItemKey) -> Result<(), CartError> {
        let mut cart = self.cart.lock().await;

        if cart.find(key).is_none() {
            debug!(product = %key.product_uuid, "removal of missing cart line ignored");
            return Ok(());
        }

        let mut next = cart.clone();
        next.items.retain(|line| !line.is_variant(key));

        self.requote_and_commit(&mut cart, next).await
    }

    /// Empty the cart. Address, payment method and delivery choice are kept.
    pub async fn clear_cart(&self) {
        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();

        next.items.clear();
        next.reset_totals();

        self.commit(&mut cart, next);
    }

    /// Set the shipping address and re-quote shipping and tax.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if the totals could not be quoted.
    pub async fn set_shipping_address(&self, address: ShippingAddress) -> Result<(), CartError> {
        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();

        next.shipping_address = Some(address);

        self.requote_and_commit(&mut cart, next).await
    }

    /// Set the payment method.
    pub async fn set_payment_method(&self, method: PaymentMethod) {
        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();

        next.payment_method = Some(method);

        self.commit(&mut cart, next);
    }

    /// Choose a delivery option and re-quote shipping.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if the option does not exist or the
    /// totals could not be quoted.
    pub async fn set_delivery_date_index(&self, index: usize) -> Result<(), CartError> {
        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();

        next.delivery_date_index = Some(index);

        self.requote_and_commit(&mut cart, next).await
    }

    /// Clamp every line to the product's current stock.
    ///
    /// Quantities only ever go down, to zero at the lowest. Products whose
    /// lookup fails are skipped and reported; the rest are still refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if a clamped cart could not be re-quoted.
    pub async fn refresh_cart_stock(&self) -> Result<StockRefresh, CartError> {
        let (snapshot, products) = self.snapshot_lines().await;
        let fetched = fetch_products(&self.catalog, products).await;

        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();

        let refresh = apply_stock(&mut next.items, &snapshot, &fetched);

        if next.items != cart.items {
            self.requote_and_commit(&mut cart, next).await?;
        }

        Ok(refresh)
    }

    /// Bring every line's stored price up to date and report effective price
    /// moves.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if a repriced cart could not be re-quoted.
    pub async fn refresh_cart_prices(&self) -> Result<PriceRefresh, CartError> {
        let (snapshot, products) = self.snapshot_lines().await;
        let fetched = fetch_products(&self.catalog, products).await;

        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();

        let refresh = apply_prices(&mut next.items, &snapshot, &fetched);

        if next.items != cart.items {
            self.requote_and_commit(&mut cart, next).await?;
        }

        Ok(refresh)
    }

    async fn snapshot_lines(&self) -> (FxHashSet<LineItemUuid>, Vec<ProductUuid>) {
        let cart = self.cart.lock().await;

        let lines = cart.items.iter().map(|line| line.uuid).collect();
        let products = cart.items.iter().map(|line| line.product_uuid).collect();

        (lines, products)
    }

    async fn requote_and_commit(
        &self,
        cart: &mut MutexGuard<'_, Cart>,
        mut next: Cart,
    ) -> Result<(), CartError> {
        let quote = self
            .calculator
            .quote(DeliveryQuoteRequest {
                items: next.items.clone(),
                shipping_address: next.shipping_address.clone(),
                delivery_date_index: next.delivery_date_index,
            })
            .await?;

        next.apply_quote(quote);

        self.commit(cart, next);

        Ok(())
    }

    fn commit(&self, cart: &mut MutexGuard<'_, Cart>, next: Cart) {
        **cart = next;

        debug!(
            lines = cart.items.len(),
            items_price = cart.items_price,
            total_price = cart.total_price,
            "cart committed"
        );

        for observer in &self.observers {
            observer.committed(&**cart);
        }
    }
}
