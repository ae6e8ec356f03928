//! Cart snapshot repository.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tracing::warn;

use crate::{
    cart::models::Cart,
    storage::{KeyValueStore, StorageError},
};

/// Default slot the cart snapshot lives under.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Reads and writes the JSON cart snapshot held under a single key.
#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl CartRepository {
    /// Repository over `store`, keeping the snapshot under `key`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Key the snapshot is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted cart.
    ///
    /// An absent slot yields an empty cart. A snapshot that does not decode is
    /// logged and also yields an empty cart; it stays in place until the next
    /// save overwrites it.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    pub async fn load(&self) -> Result<Cart, StorageError> {
        let Some(snapshot) = self.store.get(&self.key).await? else {
            return Ok(Cart::default());
        };

        match serde_json::from_str(&snapshot) {
            Ok(cart) => Ok(cart),
            Err(error) => {
                warn!(key = %self.key, %error, "discarding undecodable cart snapshot");

                Ok(Cart::default())
            }
        }
    }

    /// Overwrite the persisted snapshot with `cart`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the store rejects the write.
    pub async fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let snapshot = serde_json::to_string(cart).map_err(StorageError::Encode)?;

        self.store.set(&self.key, snapshot).await
    }
}

impl Debug for CartRepository {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartRepository")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
