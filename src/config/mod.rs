//! Cart configuration module

use clap::Args;

use crate::config::{
    observability::LoggingConfig, pricing::PricingConfig, sidebar::SidebarConfig,
    storage::StorageConfig,
};

pub mod observability;
pub mod pricing;
pub mod sidebar;
pub mod storage;

/// Storefront cart configuration, read from the environment and CLI arguments.
#[derive(Debug, Args)]
pub struct CartConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Persisted cart settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Totals and currency settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Cart sidebar settings.
    #[command(flatten)]
    pub sidebar: SidebarConfig,
}
