//! HTTP catalog client.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::{Catalog, CatalogError, Product, ProductId, StockInfo};

/// Configuration for connecting to the catalog API.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// Catalog API base address, e.g. `"http://localhost:3333"`.
    pub base_url: String,
}

/// Catalog backed by the remote JSON API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    config: HttpCatalogConfig,
    http: Client,
}

impl HttpCatalog {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: HttpCatalogConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, resource: &str, product_id: ProductId) -> String {
        format!(
            "{}/{resource}/{product_id}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        debug!(url, "fetching from catalog");

        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "GET {url} failed with status {status}: {text}"
            )));
        }

        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<StockInfo, CatalogError> {
        let stock: StockInfo = self.get_json(&self.url("stock", product_id)).await?;

        match stock.id {
            Some(returned) if returned != product_id => Err(CatalogError::ProductMismatch {
                requested: product_id,
                returned,
            }),
            _ => Ok(stock),
        }
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        let product: Product = self.get_json(&self.url("products", product_id)).await?;

        if product.id != product_id {
            return Err(CatalogError::ProductMismatch {
                requested: product_id,
                returned: product.id,
            });
        }

        Ok(product)
    }
}
