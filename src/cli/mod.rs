use std::{
    fmt::Display,
    io::{self, Write},
    sync::Arc,
};

use clap::{Parser, Subcommand};
use tokio::task::JoinHandle;

use storefront_cart::{
    config::CartConfig,
    domain::{
        carts::{CartStore, models::Cart, observers::PersistCartObserver},
        products::ProductCatalog,
    },
    storage::{KeyValueStorage, load_cart},
};

mod clear;
mod refresh;
mod show;
mod sidebar;

#[derive(Debug, Parser)]
#[command(name = "storefront-cart", about = "Storefront cart tools", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: CartConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the persisted cart
    Show,

    /// Empty the persisted cart
    Clear,

    /// Clamp cart quantities to the stock in a product feed
    RefreshStock(refresh::RefreshArgs),

    /// Update cart prices from a product feed and report changes
    RefreshPrices(refresh::RefreshArgs),

    /// Decide whether the cart sidebar is shown on a page
    Sidebar(sidebar::SidebarArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Show => show::run(&self.config).await,
            Commands::Clear => clear::run(&self.config).await,
            Commands::RefreshStock(args) => refresh::stock(&self.config, args).await,
            Commands::RefreshPrices(args) => refresh::prices(&self.config, args).await,
            Commands::Sidebar(args) => sidebar::run(&self.config, args).await,
        }
    }
}

/// The persisted cart, or an empty one when nothing has been stored yet.
async fn persisted_cart(config: &CartConfig) -> Result<Cart, String> {
    let storage = config.storage.file_storage();

    load_cart(&storage, &config.storage.cart_key)
        .await
        .map(Option::unwrap_or_default)
        .map_err(|error| format!("failed to load cart: {error}"))
}

/// A store over the persisted cart that writes every commit back to storage.
async fn open_store(
    config: &CartConfig,
    catalog: Arc<dyn ProductCatalog>,
) -> Result<(CartStore, JoinHandle<()>), String> {
    let cart = persisted_cart(config).await?;

    let calculator = config
        .pricing
        .calculator()
        .map_err(|error| format!("invalid pricing configuration: {error}"))?;

    let storage: Arc<dyn KeyValueStorage> = Arc::new(config.storage.file_storage());
    let (observer, writer) = PersistCartObserver::spawn(storage, config.storage.cart_key.clone());

    let store = CartStore::new(Arc::new(calculator), catalog)
        .with_cart(cart)
        .with_observer(Arc::new(observer));

    Ok((store, writer))
}

/// Drops the store and waits for its pending writes.
async fn close_store(store: CartStore, writer: JoinHandle<()>) -> Result<(), String> {
    drop(store);

    writer
        .await
        .map_err(|error| format!("cart writer failed: {error}"))
}

fn print_line(line: impl Display) -> Result<(), String> {
    writeln!(io::stdout().lock(), "{line}").map_err(|error| format!("failed to write output: {error}"))
}
