use std::{path::PathBuf, sync::Arc};

use clap::Args;

use storefront_cart::{config::CartConfig, domain::products::FeedCatalog};

#[derive(Debug, Args)]
pub(crate) struct RefreshArgs {
    /// JSON product feed to reconcile against
    #[arg(long, env = "CART_PRODUCT_FEED")]
    catalog: PathBuf,
}

async fn feed(args: &RefreshArgs) -> Result<FeedCatalog, String> {
    FeedCatalog::load(&args.catalog)
        .await
        .map_err(|error| format!("failed to load product feed {}: {error}", args.catalog.display()))
}

pub(crate) async fn stock(config: &CartConfig, args: RefreshArgs) -> Result<(), String> {
    let (store, writer) = super::open_store(config, Arc::new(feed(&args).await?)).await?;

    let refresh = store
        .refresh_cart_stock()
        .await
        .map_err(|error| format!("failed to refresh stock: {error}"))?;

    super::close_store(store, writer).await?;

    for adjustment in &refresh.adjustments {
        super::print_line(format!(
            "line {}: quantity {} -> {}",
            adjustment.line, adjustment.previous_quantity, adjustment.quantity
        ))?;
    }

    for product in &refresh.skipped {
        super::print_line(format!("product {product}: lookup failed, left unchanged"))?;
    }

    if !refresh.has_adjustments() {
        super::print_line("all quantities are in stock")?;
    }

    Ok(())
}

pub(crate) async fn prices(config: &CartConfig, args: RefreshArgs) -> Result<(), String> {
    let currency = config
        .pricing
        .currency()
        .map_err(|error| format!("invalid pricing configuration: {error}"))?;

    let (store, writer) = super::open_store(config, Arc::new(feed(&args).await?)).await?;

    let refresh = store
        .refresh_cart_prices()
        .await
        .map_err(|error| format!("failed to refresh prices: {error}"))?;

    super::close_store(store, writer).await?;

    for product in &refresh.skipped {
        super::print_line(format!("product {product}: lookup failed, left unchanged"))?;
    }

    let summary = refresh
        .summary(currency)
        .map_err(|error| format!("failed to summarise price changes: {error}"))?;

    super::print_line(summary.as_deref().unwrap_or("no price changes"))
}
