use clap::Args;

use storefront_cart::config::CartConfig;

#[derive(Debug, Args)]
pub(crate) struct SidebarArgs {
    /// Route path, e.g. /en-US/product/tee
    #[arg(long)]
    path: String,

    /// Viewport width in CSS pixels
    #[arg(long)]
    width: u32,

    /// Number of cart lines; read from the persisted cart when omitted
    #[arg(long)]
    items: Option<usize>,
}

pub(crate) async fn run(config: &CartConfig, args: SidebarArgs) -> Result<(), String> {
    let items = match args.items {
        Some(items) => items,
        None => super::persisted_cart(config).await?.items.len(),
    };

    let rules = config.sidebar.rules();
    let show = rules.should_show(&args.path, rules.viewport(args.width), items);

    super::print_line(show)
}
