//! Stock and price reconciliation.
//!
//! Cached line items are compared against freshly fetched product records.
//! Lookups run concurrently, one per distinct product; a failed lookup only
//! skips the lines of that product.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use tokio::task::JoinSet;
use tracing::warn;

use crate::domain::{
    carts::models::{CartLineItem, LineItemUuid},
    pricing::money::{MoneyFormatError, format_minor},
    products::{
        CatalogError, ProductCatalog,
        models::{Product, ProductUuid},
    },
};

/// Product lookups keyed by product.
pub(crate) type FetchedProducts = FxHashMap<ProductUuid, Result<Product, CatalogError>>;

/// A line whose quantity was reduced to the stock on hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustment {
    pub line: LineItemUuid,
    pub product_uuid: ProductUuid,
    pub previous_quantity: u32,
    pub quantity: u32,
}

/// Outcome of a stock refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockRefresh {
    /// Lines clamped down to the available stock.
    pub adjustments: Vec<StockAdjustment>,

    /// Products whose lookup failed; their lines were left as they were.
    pub skipped: Vec<ProductUuid>,
}

impl StockRefresh {
    /// Check if any line quantity was reduced.
    pub fn has_adjustments(&self) -> bool {
        !self.adjustments.is_empty()
    }
}

/// Whether a price went up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDirection {
    Increase,
    Decrease,
}

/// A change in a line's effective unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceChange {
    pub line: LineItemUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub previous_price: u64,
    pub price: u64,
    pub direction: PriceDirection,
}

impl PriceChange {
    /// Classifies a price move; equal prices are not a change.
    pub fn between(item: &CartLineItem, previous_price: u64, price: u64) -> Option<Self> {
        let direction = match price.cmp(&previous_price) {
            std::cmp::Ordering::Greater => PriceDirection::Increase,
            std::cmp::Ordering::Less => PriceDirection::Decrease,
            std::cmp::Ordering::Equal => return None,
        };

        Some(Self {
            line: item.uuid,
            product_uuid: item.product_uuid,
            name: item.name.clone(),
            previous_price,
            price,
            direction,
        })
    }

    /// Absolute per-unit difference.
    pub fn delta(&self) -> u64 {
        self.price.abs_diff(self.previous_price)
    }
}

/// Outcome of a price refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceRefresh {
    pub price_changes: Vec<PriceChange>,

    /// Products whose lookup failed; their lines kept their stored prices.
    pub skipped: Vec<ProductUuid>,
}

impl PriceRefresh {
    /// Check if any line's effective price moved.
    pub fn has_changes(&self) -> bool {
        !self.price_changes.is_empty()
    }

    /// Number of lines whose price went up.
    pub fn increased(&self) -> usize {
        self.changes(PriceDirection::Increase).count()
    }

    /// Number of lines whose price went down.
    pub fn decreased(&self) -> usize {
        self.changes(PriceDirection::Decrease).count()
    }

    /// Sum of the per-unit increases.
    pub fn total_increase(&self) -> u64 {
        self.changes(PriceDirection::Increase)
            .map(PriceChange::delta)
            .fold(0, u64::saturating_add)
    }

    /// Sum of the per-unit decreases.
    pub fn total_decrease(&self) -> u64 {
        self.changes(PriceDirection::Decrease)
            .map(PriceChange::delta)
            .fold(0, u64::saturating_add)
    }

    /// One combined notification line, e.g.
    /// `2 items increased by $3.00, 1 item decreased by $1.50`.
    ///
    /// # Errors
    ///
    /// Returns an error if a total cannot be represented as money.
    pub fn summary(&self, currency: &'static Currency) -> Result<Option<String>, MoneyFormatError> {
        let mut parts = Vec::with_capacity(2);

        let increased = self.increased();
        if increased > 0 {
            parts.push(format!(
                "{} increased by {}",
                items_label(increased),
                format_minor(self.total_increase(), currency)?
            ));
        }

        let decreased = self.decreased();
        if decreased > 0 {
            parts.push(format!(
                "{} decreased by {}",
                items_label(decreased),
                format_minor(self.total_decrease(), currency)?
            ));
        }

        if parts.is_empty() {
            return Ok(None);
        }

        Ok(Some(parts.join(", ")))
    }

    fn changes(&self, direction: PriceDirection) -> impl Iterator<Item = &PriceChange> {
        self.price_changes
            .iter()
            .filter(move |change| change.direction == direction)
    }
}

fn items_label(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

/// Fetches each distinct product once, concurrently.
pub(crate) async fn fetch_products(
    catalog: &Arc<dyn ProductCatalog>,
    products: impl IntoIterator<Item = ProductUuid>,
) -> FetchedProducts {
    let mut distinct = FxHashSet::default();
    let mut lookups = JoinSet::new();

    for product in products {
        if distinct.insert(product) {
            let catalog = Arc::clone(catalog);

            lookups.spawn(async move { (product, catalog.get_product(product).await) });
        }
    }

    let mut fetched = FxHashMap::default();

    while let Some(joined) = lookups.join_next().await {
        match joined {
            Ok((product, result)) => {
                fetched.insert(product, result);
            }
            Err(error) => warn!("product lookup task failed: {error}"),
        }
    }

    fetched
}

/// Clamps quantities to fresh stock and replaces cached stock levels.
///
/// Only lines in `snapshot` are touched; quantities never increase.
pub(crate) fn apply_stock(
    items: &mut [CartLineItem],
    snapshot: &FxHashSet<LineItemUuid>,
    fetched: &FetchedProducts,
) -> StockRefresh {
    let mut refresh = StockRefresh::default();

    for item in items.iter_mut().filter(|item| snapshot.contains(&item.uuid)) {
        let Some(product) = fetched_product(fetched, item.product_uuid, &mut refresh.skipped) else {
            continue;
        };

        let available = product.count_in_stock(&item.color, &item.size);

        if item.quantity > available {
            refresh.adjustments.push(StockAdjustment {
                line: item.uuid,
                product_uuid: item.product_uuid,
                previous_quantity: item.quantity,
                quantity: available,
            });

            item.quantity = available;
        }

        item.colors.clone_from(&product.colors);
    }

    refresh
}

/// Stores fresh prices on each line and records effective price moves.
pub(crate) fn apply_prices(
    items: &mut [CartLineItem],
    snapshot: &FxHashSet<LineItemUuid>,
    fetched: &FetchedProducts,
) -> PriceRefresh {
    let mut refresh = PriceRefresh::default();

    for item in items.iter_mut().filter(|item| snapshot.contains(&item.uuid)) {
        let Some(product) = fetched_product(fetched, item.product_uuid, &mut refresh.skipped) else {
            continue;
        };

        let previous_price = item.effective_price();

        item.price = product.price;
        item.discounted_price = product.discounted_price;

        if let Some(change) = PriceChange::between(item, previous_price, item.effective_price()) {
            refresh.price_changes.push(change);
        }
    }

    refresh
}

fn fetched_product<'a>(
    fetched: &'a FetchedProducts,
    product: ProductUuid,
    skipped: &mut Vec<ProductUuid>,
) -> Option<&'a Product> {
    match fetched.get(&product) {
        Some(Ok(product)) => Some(product),
        Some(Err(error)) => {
            warn!(%product, "skipping cart lines: {error}");
            note_skipped(skipped, product);
            None
        }
        None => {
            note_skipped(skipped, product);
            None
        }
    }
}

fn note_skipped(skipped: &mut Vec<ProductUuid>, product: ProductUuid) {
    if !skipped.contains(&product) {
        skipped.push(product);
    }
}
