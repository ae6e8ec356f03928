//! Catalog errors.

use thiserror::Error;

use crate::catalog::ProductId;

/// Errors that can occur when talking to the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog returned a non-2xx response.
    #[error("unexpected response from catalog: {0}")]
    UnexpectedResponse(String),

    /// The response body did not match the expected shape.
    #[error("malformed catalog response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A stock or product body named a different product than requested.
    #[error("catalog returned product {returned} for product {requested}")]
    ProductMismatch {
        /// Identifier that was requested.
        requested: ProductId,

        /// Identifier found in the response body.
        returned: ProductId,
    },
}
