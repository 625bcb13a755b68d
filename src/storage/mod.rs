//! Client-side key/value storage for the persisted cart.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::debug;

use crate::domain::carts::models::Cart;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key the cart aggregate is stored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cart-store";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded.
    #[error("invalid stored document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be used as a storage slot name.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

/// A string key/value slot store, like a browser's local storage.
#[automock]
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Missing keys are not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Restores a persisted cart.
///
/// # Errors
///
/// Returns an error if the storage cannot be read or holds an invalid document.
pub async fn load_cart(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<Cart>, StorageError> {
    let Some(document) = storage.get(key).await? else {
        debug!(key, "no persisted cart");
        return Ok(None);
    };

    let cart = serde_json::from_str(&document)?;

    Ok(Some(cart))
}

/// Persists a cart as a single JSON document.
///
/// # Errors
///
/// Returns an error if the cart cannot be encoded or the storage write fails.
pub async fn save_cart(
    storage: &dyn KeyValueStorage,
    key: &str,
    cart: &Cart,
) -> Result<(), StorageError> {
    let document = serde_json::to_string(cart)?;

    storage.set(key, document).await
}
