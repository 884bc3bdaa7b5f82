//! Groovy Core - Shared types library.
//!
//! This crate provides common types used across all Groovy Goods components:
//! - `storefront` - Cart ledger, catalog service and persisted session state
//! - `cli` - Command-line presentation layer for browsing and checkout
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no file access,
//! no async runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for SKUs, sizes, prices, products and catalog queries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
