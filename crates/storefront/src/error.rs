//! Unified error handling.
//!
//! Provides a unified `AppError` type for operations that cross module
//! boundaries. The presentation layer matches on it to decide between a
//! retry prompt and a plain error message.

use groovy_core::SizeError;
use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart mutation rejected its input.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Loading persisted state failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A size label could not be parsed.
    #[error("Invalid size: {0}")]
    Size(#[from] SizeError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request makes no sense in the current state.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the same request may succeed if retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Catalog(e) => e.is_retryable(),
            _ => false,
        }
    }
}
