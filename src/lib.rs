//! Cart Store
//!
//! Client-side shopping cart state: stock-checked changes against a remote
//! catalog, persisted as a JSON snapshot in a key-value store and shared with
//! the rest of the application through [`cart::CartStore`].

pub mod cart;
pub mod catalog;
pub mod config;
pub mod context;
pub mod notifications;
pub mod observability;
pub mod storage;
