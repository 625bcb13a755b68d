use std::sync::Arc;

use storefront_cart::{config::CartConfig, domain::products::FeedCatalog};

pub(crate) async fn run(config: &CartConfig) -> Result<(), String> {
    let (store, writer) = super::open_store(config, Arc::new(FeedCatalog::default())).await?;

    let removed = store.snapshot().await.items.len();

    store.clear_cart().await;

    super::close_store(store, writer).await?;

    super::print_line(format!("removed {removed} line(s) from the cart"))
}
