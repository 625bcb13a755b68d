//! Storage Config

use std::path::PathBuf;

use clap::Args;

use crate::storage::{DEFAULT_CART_KEY, FileStorage};

/// Where the cart aggregate is persisted.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding persisted client state
    #[arg(long, env = "CART_STORAGE_DIR", default_value = ".storefront")]
    pub storage_dir: PathBuf,

    /// Storage key of the cart document
    #[arg(long, env = "CART_STORAGE_KEY", default_value = DEFAULT_CART_KEY)]
    pub cart_key: String,
}

impl StorageConfig {
    /// File storage rooted at the configured directory.
    #[must_use]
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(self.storage_dir.clone())
    }
}
