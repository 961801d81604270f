//! Core types for StyleHub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod category;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{CartEntry, CartIndex};
pub use category::Category;
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::{LOW_STOCK_THRESHOLD, Product};
