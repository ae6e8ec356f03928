//! Cart

pub mod errors;
pub mod models;
pub mod store;
pub mod summary;

pub use errors::{CartStoreError, InvalidCart, Rejection};
pub use models::{Cart, CartItem, CartOutcome, UpdateProductAmount};
pub use store::CartStore;
