//! Catalog
//!
//! Remote stock levels and product details consulted before a cart change.

use async_trait::async_trait;
use mockall::automock;

mod errors;
mod http;
mod models;

pub use errors::CatalogError;
pub use http::{HttpCatalog, HttpCatalogConfig};
pub use models::*;

/// Source of stock levels and product details.
#[automock]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch the current stock level of a product.
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, CatalogError>;

    /// Fetch the details of a product.
    async fn product(&self, product_id: ProductId) -> Result<Product, CatalogError>;
}
