//! Storefront Cart CLI

use std::process;

use clap::Parser;

use storefront_cart::observability::init_logging;

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli.config.logging) {
        exit_with(&error.to_string());
    }

    if let Err(error) = cli.run().await {
        exit_with(&error);
    }
}

fn exit_with(message: &str) -> ! {
    #[expect(
        clippy::print_stderr,
        reason = "errors are reported to the terminal before exiting"
    )]
    {
        eprintln!("{message}");
    }

    #[expect(clippy::exit, reason = "non-zero status for failed commands")]
    process::exit(1);
}
