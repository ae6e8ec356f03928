//! Cart store.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    num::NonZeroU64,
    sync::Arc,
};

use tokio::sync::{Mutex, watch};
use tracing::{debug, error, instrument, warn};

use crate::{
    cart::{
        errors::{CartStoreError, Rejection},
        models::{Cart, CartOutcome, UpdateProductAmount},
    },
    catalog::{Catalog, ProductId},
    notifications::{Notification, Notifier},
    storage::CartRepository,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Remove,
    Update,
}

impl Operation {
    const fn failure(self) -> Notification {
        match self {
            Self::Add => Notification::AddFailed,
            Self::Remove => Notification::RemoveFailed,
            Self::Update => Notification::UpdateFailed,
        }
    }

    const fn rejected(self, rejection: Rejection) -> Notification {
        match rejection {
            Rejection::OutOfStock { .. } => Notification::OutOfStock,
            Rejection::NotInCart { .. } => self.failure(),
        }
    }
}

/// Shared cart state and the only way to change it.
///
/// Every change is validated against the catalog, written to the repository
/// and only then published to readers. Changes are applied one at a time;
/// reads never wait on a change in flight.
pub struct CartStore {
    catalog: Arc<dyn Catalog>,
    repository: CartRepository,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<Cart>,
    mutations: Mutex<()>,
}

impl CartStore {
    /// Build a store from the cart persisted in `repository`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub async fn load(
        catalog: Arc<dyn Catalog>,
        repository: CartRepository,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, CartStoreError> {
        let cart = repository.load().await?;

        debug!(key = repository.key(), items = cart.len(), "cart loaded");

        Ok(Self {
            catalog,
            repository,
            notifier,
            state: watch::Sender::new(cart),
            mutations: Mutex::new(()),
        })
    }

    /// Current cart contents.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Receiver observing every committed cart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Add one unit of a product, checked against its stock level.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or the repository fails.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<CartOutcome, CartStoreError> {
        let _guard = self.mutations.lock().await;

        let result = self.try_add_product(product_id).await;

        self.settle(Operation::Add, result)
    }

    /// Remove a product line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    #[instrument(skip(self))]
    pub async fn remove_product(
        &self,
        product_id: ProductId,
    ) -> Result<CartOutcome, CartStoreError> {
        let _guard = self.mutations.lock().await;

        let result = self.try_remove_product(product_id).await;

        self.settle(Operation::Remove, result)
    }

    /// Set the quantity of a product line, checked against its stock level.
    ///
    /// Non-positive amounts are ignored without contacting the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or the repository fails.
    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<CartOutcome, CartStoreError> {
        let Some(requested) = u64::try_from(update.amount).ok().and_then(NonZeroU64::new) else {
            debug!("ignoring non-positive amount");

            return Ok(CartOutcome::Ignored);
        };

        let _guard = self.mutations.lock().await;

        let result = self.try_update_product_amount(update.product_id, requested).await;

        self.settle(Operation::Update, result)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<CartOutcome, CartStoreError> {
        let stock = self.catalog.stock(product_id).await?;
        let product = self.catalog.product(product_id).await?;

        let mut cart = self.cart();

        match cart.add_one(product, stock.amount) {
            Ok(()) => self.commit(cart).await,
            Err(rejection) => Ok(CartOutcome::Rejected(rejection)),
        }
    }

    async fn try_remove_product(
        &self,
        product_id: ProductId,
    ) -> Result<CartOutcome, CartStoreError> {
        let mut cart = self.cart();

        match cart.remove(product_id) {
            Ok(_) => self.commit(cart).await,
            Err(rejection) => Ok(CartOutcome::Rejected(rejection)),
        }
    }

    async fn try_update_product_amount(
        &self,
        product_id: ProductId,
        requested: NonZeroU64,
    ) -> Result<CartOutcome, CartStoreError> {
        let stock = self.catalog.stock(product_id).await?;

        let mut cart = self.cart();

        match cart.set_amount(product_id, requested, stock.amount) {
            Ok(()) => self.commit(cart).await,
            Err(rejection) => Ok(CartOutcome::Rejected(rejection)),
        }
    }

    /// Persist `cart`, then publish it. A failed write publishes nothing.
    async fn commit(&self, cart: Cart) -> Result<CartOutcome, CartStoreError> {
        self.repository.save(&cart).await?;
        self.state.send_replace(cart.clone());

        debug!(items = cart.len(), "cart committed");

        Ok(CartOutcome::Committed(cart))
    }

    fn settle(
        &self,
        operation: Operation,
        result: Result<CartOutcome, CartStoreError>,
    ) -> Result<CartOutcome, CartStoreError> {
        match &result {
            Ok(CartOutcome::Rejected(rejection)) => {
                warn!(?operation, %rejection, "cart change rejected");

                self.notifier.notify(operation.rejected(*rejection));
            }
            Err(failure) => {
                error!(?operation, error = ?failure, "cart change failed");

                self.notifier.notify(operation.failure());
            }
            Ok(CartOutcome::Committed(_) | CartOutcome::Ignored) => {}
        }

        result
    }
}

impl Debug for CartStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("repository", &self.repository)
            .field("cart", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
