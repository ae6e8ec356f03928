//! Cart Context

use std::sync::Arc;

use crate::{
    cart::{CartStore, CartStoreError},
    catalog::{HttpCatalog, HttpCatalogConfig},
    config::CartConfig,
    notifications::Notifier,
    storage::{CartRepository, FileStore},
};

/// Handle the rest of the application obtains the cart through.
#[derive(Debug, Clone)]
pub struct CartContext {
    /// Store loaded from the configured storage.
    pub store: Arc<CartStore>,
}

impl CartContext {
    /// Build the cart context from configuration, loading the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the persisted cart cannot be read.
    pub async fn from_config(
        config: &CartConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, CartStoreError> {
        let catalog = HttpCatalog::new(HttpCatalogConfig::from(&config.catalog));
        let storage = FileStore::new(&config.storage.storage_dir);
        let repository = CartRepository::new(Arc::new(storage), &config.storage.storage_key);

        let store = CartStore::load(Arc::new(catalog), repository, notifier).await?;

        Ok(Self {
            store: Arc::new(store),
        })
    }
}
