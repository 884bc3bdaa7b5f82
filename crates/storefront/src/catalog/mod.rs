//! Product catalog service.
//!
//! Serves the bundled product feed (or a feed file named in configuration)
//! the way a remote catalog API would: every uncached call waits a random
//! latency and may fail, so callers have to handle a retry path.
//! Listings are cached using `moka` for a short stale time (5 seconds by
//! default), and failures are never cached.
//!
//! # Example
//!
//! ```rust,ignore
//! use groovy_storefront::catalog::CatalogService;
//!
//! let catalog = CatalogService::load(&config.catalog).await?;
//! let products = catalog.list_products(&query, &page).await?;
//! ```

mod cache;

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use groovy_core::{PageRequest, ProductQuery, ProductRef, Sku, Sort, SortOrder, SortProperty};
use moka::future::Cache;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::CatalogConfig;

use cache::{CacheKey, CacheValue};

/// Product feed shipped with the crate.
const BUNDLED_FEED: &str = include_str!("../../data/products.json");

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The (simulated) catalog backend failed; the caller may retry.
    #[error("Catalog unavailable, please retry")]
    Unavailable,

    /// No product has the requested SKU.
    #[error("Product not found: {0}")]
    NotFound(Sku),

    /// Reading a feed file failed.
    #[error("Failed to read catalog feed: {0}")]
    Io(#[from] std::io::Error),

    /// The feed is not valid JSON or does not match the product shape.
    #[error("Catalog feed parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether trying the same call again may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

#[derive(Deserialize)]
struct Feed {
    data: FeedData,
}

#[derive(Deserialize)]
struct FeedData {
    products: Vec<ProductRef>,
}

/// Parse a `{"data": {"products": [...]}}` feed document.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] if the document does not match.
pub fn parse_feed(json: &str) -> Result<Vec<ProductRef>, CatalogError> {
    let feed: Feed = serde_json::from_str(json)?;
    Ok(feed.data.products)
}

// =============================================================================
// CatalogService
// =============================================================================

/// Client for the product catalog.
///
/// Cheap to clone; clones share the product list and cache.
#[derive(Clone)]
pub struct CatalogService {
    inner: Arc<CatalogServiceInner>,
}

struct CatalogServiceInner {
    products: Vec<ProductRef>,
    latency_min_ms: u64,
    latency_max_ms: u64,
    failure_rate: f64,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogService {
    /// Create a catalog over an explicit product list.
    #[must_use]
    pub fn new(products: Vec<ProductRef>, config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(config.cache_ttl)
            .build();

        let latency_min_ms = duration_ms(config.latency_min);
        let latency_max_ms = duration_ms(config.latency_max).max(latency_min_ms);
        let failure_rate = if config.failure_rate.is_finite() {
            config.failure_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            inner: Arc::new(CatalogServiceInner {
                products,
                latency_min_ms,
                latency_max_ms,
                failure_rate,
                cache,
            }),
        }
    }

    /// Create a catalog over the bundled product feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled feed fails to parse.
    pub fn bundled(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(parse_feed(BUNDLED_FEED)?, config))
    }

    /// Create a catalog from `config.data_path`, falling back to the bundled feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed file cannot be read or parsed.
    pub async fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let Some(path) = &config.data_path else {
            return Self::bundled(config);
        };

        let content = tokio::fs::read_to_string(path).await?;
        let products = parse_feed(&content)?;
        info!(path = %path.display(), products = products.len(), "Loaded catalog feed");
        Ok(Self::new(products, config))
    }

    /// Number of products in the feed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.products.is_empty()
    }

    /// List products matching `query`, ordered and paged by `page`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unavailable`] when the simulated backend fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        query: &ProductQuery,
        page: &PageRequest,
    ) -> Result<Vec<ProductRef>, CatalogError> {
        let cache_key = CacheKey::Products {
            query: query.clone(),
            page: page.clone(),
        };

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        self.simulate_network().await?;

        let products = select(&self.inner.products, query, page);
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product by SKU.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown SKU, or
    /// [`CatalogError::Unavailable`] when the simulated backend fails.
    #[instrument(skip(self), fields(sku = %sku))]
    pub async fn find(&self, sku: Sku) -> Result<ProductRef, CatalogError> {
        let cache_key = CacheKey::Product(sku);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        self.simulate_network().await?;

        let product = self
            .inner
            .products
            .iter()
            .find(|p| p.sku == sku)
            .cloned()
            .ok_or(CatalogError::NotFound(sku))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Wait a random latency, then fail with the configured probability.
    async fn simulate_network(&self) -> Result<(), CatalogError> {
        // ThreadRng is !Send, so draw everything before the first await.
        let (delay_ms, failed) = {
            let mut rng = rand::rng();
            let delay = rng.random_range(self.inner.latency_min_ms..=self.inner.latency_max_ms);
            let failed = self.inner.failure_rate > 0.0 && rng.random_bool(self.inner.failure_rate);
            (delay, failed)
        };

        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        if failed {
            warn!(delay_ms, "Simulated catalog failure");
            return Err(CatalogError::Unavailable);
        }
        Ok(())
    }
}

// =============================================================================
// Filtering, sorting and paging
// =============================================================================

/// Apply a query, sort criteria and paging to a product list.
///
/// A product matches when it offers any of the queried sizes; no sizes
/// matches everything. Sort criteria are applied one after another with a
/// stable sort, so the last criterion wins and ties keep the earlier order.
#[must_use]
pub fn select(products: &[ProductRef], query: &ProductQuery, page: &PageRequest) -> Vec<ProductRef> {
    let mut selected: Vec<ProductRef> = products
        .iter()
        .filter(|p| query.sizes.is_empty() || p.offers_any(&query.sizes))
        .cloned()
        .collect();

    for sort in &page.sort {
        selected.sort_by(|a, b| compare(a, b, *sort));
    }

    let Some(limit) = page.limit else {
        return selected;
    };
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let page_index = usize::try_from(page.page.unwrap_or(1).max(1) - 1).unwrap_or(usize::MAX);

    selected
        .into_iter()
        .skip(page_index.saturating_mul(limit))
        .take(limit)
        .collect()
}

fn compare(a: &ProductRef, b: &ProductRef, sort: Sort) -> Ordering {
    let ordering = match sort.property {
        SortProperty::Price => a.price.cmp(&b.price),
        SortProperty::Title => a.title.cmp(&b.title),
        SortProperty::Sku => a.sku.cmp(&b.sku),
        SortProperty::Installments => a.installments.cmp(&b.installments),
    };
    match sort.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
