//! Cache types for catalog responses.

use groovy_core::{PageRequest, ProductQuery, ProductRef, Sku};

/// Cache key for listings and single-product lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(Sku),
    Products {
        query: ProductQuery,
        page: PageRequest,
    },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<ProductRef>),
    Products(Vec<ProductRef>),
}
