//! Groovy Goods Storefront library.
//!
//! Cart ledger, catalog service and persisted session state for the
//! storefront. The presentation layer (the `groovy` CLI) owns one
//! [`state::AppState`] and drives everything through it.
//!
//! # Modules
//!
//! - [`cart`] - Cart ledger keyed by SKU and size
//! - [`catalog`] - Product listing with filtering, sorting, caching and simulated latency
//! - [`checkout`] - Checkout summary, confirmation and receipts
//! - [`filter`] - Persisted size filter and sort selection
//! - [`store`] - Snapshot persistence
//! - [`view`] - Pre-formatted display models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod filter;
pub mod state;
pub mod store;
pub mod view;
