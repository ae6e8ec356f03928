//! Configuration module

use clap::Args;

pub use crate::config::{
    catalog::CatalogConfig,
    observability::{LogFormat, LoggingConfig},
    storage::StorageConfig,
};

mod catalog;
mod observability;
mod storage;

/// Cart configuration, read from CLI arguments with environment fallbacks.
#[derive(Debug, Args)]
pub struct CartConfig {
    /// Remote catalog settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Cart persistence settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
