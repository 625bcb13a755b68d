use std::io;

use storefront_cart::{config::CartConfig, domain::carts::summary::CartSummary};

pub(crate) async fn run(config: &CartConfig) -> Result<(), String> {
    let currency = config
        .pricing
        .currency()
        .map_err(|error| format!("invalid pricing configuration: {error}"))?;

    let cart = super::persisted_cart(config).await?;

    CartSummary::new(&cart, currency)
        .write_to(io::stdout().lock())
        .map_err(|error| format!("failed to print cart: {error}"))
}
