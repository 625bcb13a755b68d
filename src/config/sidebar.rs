//! Sidebar Config

use clap::Args;

use crate::sidebar::{DEFAULT_DESKTOP_MIN_WIDTH, SidebarRules};

/// Cart sidebar settings.
#[derive(Debug, Args)]
pub struct SidebarConfig {
    /// Narrowest viewport width, in CSS pixels, treated as desktop
    #[arg(long, env = "CART_DESKTOP_MIN_WIDTH", default_value_t = DEFAULT_DESKTOP_MIN_WIDTH)]
    pub desktop_min_width: u32,

    /// Locale route prefixes, comma separated
    #[arg(
        long,
        env = "CART_LOCALES",
        value_delimiter = ',',
        default_value = "en-US,ar,fr"
    )]
    pub locales: Vec<String>,
}

impl SidebarConfig {
    /// Sidebar rules for the configured locales and breakpoint.
    #[must_use]
    pub fn rules(&self) -> SidebarRules {
        SidebarRules::new(self.locales.iter().cloned(), self.desktop_min_width)
    }
}
