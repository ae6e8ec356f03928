//! Storage
//!
//! Durable key-value slots and the cart snapshot kept in one of them.

use async_trait::async_trait;
use mockall::automock;

mod errors;
mod file;
mod memory;
mod repository;

pub use errors::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::{CartRepository, DEFAULT_CART_KEY};

/// String values held durably under string keys.
#[automock]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}
