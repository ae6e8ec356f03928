//! Storage Config

use std::path::PathBuf;

use clap::Args;

use crate::storage::DEFAULT_CART_KEY;

/// Cart persistence settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory the cart snapshot is kept in
    #[arg(long, env = "CART_STORAGE_DIR", default_value = ".cart")]
    pub storage_dir: PathBuf,

    /// Key the cart snapshot is stored under
    #[arg(long, env = "CART_STORAGE_KEY", default_value = DEFAULT_CART_KEY)]
    pub storage_key: String,
}
