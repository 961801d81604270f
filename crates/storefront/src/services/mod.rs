//! Storefront services.
//!
//! - [`catalog`] - catalog snapshot, filter/sort criteria, derived list
//! - [`cart`] - per-user cart mutations and the local quantity index

pub mod cart;
pub mod catalog;

pub use cart::CartService;
pub use catalog::{CatalogService, SortKey, ViewCriteria};
