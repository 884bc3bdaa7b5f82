//! Core types for the Groovy Goods storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod query;
pub mod size;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::ProductRef;
pub use query::{PageRequest, ProductQuery, Sort, SortOrder, SortProperty};
pub use size::{SizeError, SizeLabel};
