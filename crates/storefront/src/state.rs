//! Application state owned by the presentation layer.

use groovy_core::{ProductRef, SizeLabel, Sku, Sort};
use tracing::{info, warn};

use crate::cart::{CartLedger, Outcome};
use crate::catalog::CatalogService;
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::filter::FilterState;
use crate::store::{JsonFileStore, Snapshot, StateStore};

/// Top-level application context.
///
/// Owns the cart, the filter selection and the services they talk to. The
/// presentation layer constructs one and passes it by reference; every
/// mutating method mirrors the new state to the [`StateStore`].
pub struct AppState {
    config: StorefrontConfig,
    catalog: CatalogService,
    store: Box<dyn StateStore>,
    cart: CartLedger,
    filter: FilterState,
}

impl AppState {
    /// Build the state from configuration, restoring the persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog feed cannot be loaded. Unreadable
    /// persisted state is logged and replaced by an empty session.
    pub async fn load(config: StorefrontConfig) -> Result<Self, AppError> {
        let catalog = CatalogService::load(&config.catalog).await?;
        let store = JsonFileStore::new(&config.state_path);
        Ok(Self::with_store(config, catalog, Box::new(store)))
    }

    /// Build the state over explicit services, restoring from `store`.
    #[must_use]
    pub fn with_store(
        config: StorefrontConfig,
        catalog: CatalogService,
        store: Box<dyn StateStore>,
    ) -> Self {
        let (cart, filter) = match store.load() {
            Ok(Some(snapshot)) => {
                info!(
                    lines = snapshot.cart.len(),
                    saved_at = %snapshot.saved_at,
                    "Restored session state"
                );
                (snapshot.cart, snapshot.filter)
            }
            Ok(None) => (CartLedger::new(), FilterState::default()),
            Err(e) => {
                warn!("Discarding unreadable session state: {e}");
                (CartLedger::new(), FilterState::default())
            }
        };

        Self {
            config,
            catalog,
            store,
            cart,
            filter,
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the catalog service.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartLedger {
        &self.cart
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is not offered or the quantity is 0.
    pub fn add_product(
        &mut self,
        product: &ProductRef,
        size: SizeLabel,
        quantity: u32,
    ) -> Result<Outcome, AppError> {
        let outcome = self.cart.add_product(product, size, quantity)?;
        Ok(self.persist_if(outcome))
    }

    pub fn increase(&mut self, sku: Sku, size: &SizeLabel, delta: u32) -> Outcome {
        let outcome = self.cart.increase(sku, size, delta);
        self.persist_if(outcome)
    }

    pub fn decrease(&mut self, sku: Sku, size: &SizeLabel, delta: u32) -> Outcome {
        let outcome = self.cart.decrease(sku, size, delta);
        self.persist_if(outcome)
    }

    /// Overwrite a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is 0.
    pub fn set_quantity(
        &mut self,
        sku: Sku,
        size: &SizeLabel,
        quantity: u32,
    ) -> Result<Outcome, AppError> {
        let outcome = self.cart.set_quantity(sku, size, quantity)?;
        Ok(self.persist_if(outcome))
    }

    pub fn remove_product(&mut self, sku: Sku, size: &SizeLabel) -> Outcome {
        let outcome = self.cart.remove_product(sku, size);
        self.persist_if(outcome)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear_cart();
        self.persist();
    }

    pub fn set_visibility(&mut self, open: bool) {
        self.cart.set_visibility(open);
        self.persist();
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub fn change_sizes(&mut self, sizes: Vec<SizeLabel>) {
        self.filter.change_sizes(sizes);
        self.persist();
    }

    pub fn change_sort(&mut self, sort: Vec<Sort>) {
        self.filter.change_sort(sort);
        self.persist();
    }

    /// List products for the current filter selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog call fails; see
    /// [`AppError::is_retryable`].
    pub async fn list_products(&self) -> Result<Vec<ProductRef>, AppError> {
        let (query, page) = self.filter.to_query();
        Ok(self.catalog.list_products(&query, &page).await?)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn persist_if(&self, outcome: Outcome) -> Outcome {
        if outcome.is_applied() {
            self.persist();
        }
        outcome
    }

    /// Mirror the current state to the store. Failures are logged only.
    fn persist(&self) {
        let snapshot = Snapshot::capture(&self.cart, &self.filter);
        if let Err(e) = self.store.save(&snapshot) {
            warn!("Failed to persist session state: {e}");
        }
    }
}
