//! StyleHub Core - Shared types library.
//!
//! This crate provides common types used across all StyleHub components:
//! - `storefront` - The catalog view and cart reconciliation engines
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no store
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, categories, products, and cart entries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
