//! Cart errors.

use thiserror::Error;

use crate::{
    catalog::{CatalogError, ProductId},
    storage::StorageError,
};

/// Expected refusal of a cart change. Nothing is modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Not enough units in stock for the requested quantity.
    #[error("product {product_id}: {requested} requested, {available} in stock")]
    OutOfStock {
        /// Product being changed.
        product_id: ProductId,

        /// Quantity the cart line would have held after the change.
        requested: u64,

        /// Units reported by the catalog.
        available: u32,
    },

    /// The product has no line in the cart.
    #[error("product {product_id} is not in the cart")]
    NotInCart {
        /// Product being changed.
        product_id: ProductId,
    },
}

/// Unexpected failure while performing a cart change. Nothing is modified.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The catalog lookup failed.
    #[error("catalog error")]
    Catalog(#[from] CatalogError),

    /// Reading or writing the cart snapshot failed.
    #[error("storage error")]
    Storage(#[from] StorageError),
}

/// A sequence of items that breaks the cart invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidCart {
    /// Two lines hold the same product.
    #[error("product {0} appears more than once")]
    DuplicateItem(ProductId),

    /// A line holds no units.
    #[error("product {0} has a zero amount")]
    ZeroAmount(ProductId),
}
