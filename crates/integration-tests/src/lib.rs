//! Integration tests for the Groovy Goods storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p groovy-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Shopper journeys: add, adjust, remove, check out
//! - `persistence` - Session state surviving a restart
//! - `catalog` - Filtering, sorting and the fetch retry path
//!
//! Every test gets its own state file under the system temp directory, so
//! tests can run in parallel.

use std::path::{Path, PathBuf};

use groovy_core::{ProductRef, SizeLabel, Sku};
use groovy_storefront::config::{CatalogConfig, StorefrontConfig};
use groovy_storefront::state::AppState;

/// SKU of the first product in the bundled feed ("Cat Tee Black T-Shirt").
pub const CAT_TEE: Sku = Sku::new(12_064_273_040_195_392);

/// A throwaway state file and the configuration pointing at it.
pub struct TestContext {
    pub config: StorefrontConfig,
    dir: PathBuf,
}

impl TestContext {
    /// Fresh context with an instant, never-failing catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(CatalogConfig::instant())
    }

    /// Fresh context with a custom catalog configuration.
    #[must_use]
    pub fn with_catalog(catalog: CatalogConfig) -> Self {
        let dir = std::env::temp_dir().join(format!("groovy-it-{}", uuid::Uuid::new_v4()));
        let config = StorefrontConfig {
            state_path: dir.join("cart-store.json"),
            catalog,
        };
        Self { config, dir }
    }

    #[must_use]
    pub fn state_path(&self) -> &Path {
        &self.config.state_path
    }

    /// Start (or restart) the application against this context's state file.
    ///
    /// # Panics
    ///
    /// Panics if the bundled catalog fails to load.
    #[allow(clippy::expect_used)]
    pub async fn start(&self) -> AppState {
        AppState::load(self.config.clone())
            .await
            .expect("application should start")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// Parse a size label.
///
/// # Panics
///
/// Panics if `s` is not a valid size label.
#[must_use]
#[allow(clippy::expect_used)]
pub fn size(s: &str) -> SizeLabel {
    SizeLabel::parse(s).expect("valid size label")
}

/// The first product of the current listing and its first size, like
/// clicking the first "add to cart" button on the page.
///
/// # Panics
///
/// Panics if the listing fails or is empty.
#[allow(clippy::expect_used)]
pub async fn first_listed(state: &AppState) -> (ProductRef, SizeLabel) {
    let products = state.list_products().await.expect("listing should load");
    let product = products.into_iter().next().expect("listing is not empty");
    let size = product
        .available_sizes
        .first()
        .cloned()
        .expect("product has a size");
    (product, size)
}
