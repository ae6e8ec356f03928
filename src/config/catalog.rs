//! Catalog Config

use clap::Args;

use crate::catalog::HttpCatalogConfig;

/// Remote catalog settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Catalog API base URL
    #[arg(long, env = "CART_API_URL", default_value = "http://localhost:3333")]
    pub api_url: String,
}

impl From<&CatalogConfig> for HttpCatalogConfig {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
        }
    }
}
