//! Cart commit observers.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    domain::carts::models::Cart,
    storage::{KeyValueStorage, save_cart},
};

/// Notified with the new aggregate every time the store commits a mutation.
///
/// Called while the store is held, so implementations must not block.
pub trait CartObserver: Send + Sync {
    /// A mutation has been committed.
    fn committed(&self, cart: &Cart);
}

/// Persists every committed cart to key/value storage from a background task.
#[derive(Debug, Clone)]
pub struct PersistCartObserver {
    sender: mpsc::UnboundedSender<Cart>,
}

impl PersistCartObserver {
    /// Spawn the writer task on the current runtime.
    ///
    /// The task exits once every clone of the observer has been dropped and
    /// all queued carts are written.
    pub fn spawn(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Cart>();
        let key = key.into();

        let handle = tokio::spawn(async move {
            while let Some(cart) = receiver.recv().await {
                match save_cart(storage.as_ref(), &key, &cart).await {
                    Ok(()) => debug!(key, items = cart.items.len(), "cart persisted"),
                    Err(error) => warn!(key, "failed to persist cart: {error}"),
                }
            }
        });

        (Self { sender }, handle)
    }
}

impl CartObserver for PersistCartObserver {
    fn committed(&self, cart: &Cart) {
        if self.sender.send(cart.clone()).is_err() {
            warn!("cart persistence writer has stopped; dropping update");
        }
    }
}
