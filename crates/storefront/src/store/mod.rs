//! Remote catalog/cart store capabilities.
//!
//! The engines depend on the store only through the [`CatalogStore`] and
//! [`CartStore`] traits. One concrete implementation ships here:
//! [`RestStoreClient`], a REST client for a PostgREST-style row API.
//!
//! # Semantics the engines rely on
//!
//! - `list_products` returns the full catalog, newest first.
//! - `upsert_cart_entry` creates the row if absent or overwrites it if
//!   present, in one operation.
//! - Quantities are `NonZeroU32` at this boundary: a zero quantity is
//!   expressed by deleting the row, never by writing 0.

mod rest;

pub use rest::RestStoreClient;

use std::num::NonZeroU32;

use thiserror::Error;

use stylehub_core::{CartEntry, Product, ProductId, UserId};

/// Errors that can occur when talking to the remote store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed (connection, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store responded with a non-success status.
    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A row came back in a shape this client cannot accept.
    #[error("malformed store row: {0}")]
    MalformedRow(String),

    /// Rate limited by the store.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// Read access to the product catalog.
///
/// The engines are generic over their store, so these traits use native
/// async methods and are not object safe.
#[allow(async_fn_in_trait)]
pub trait CatalogStore {
    /// Fetch the full product set, ordered by creation time descending.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;
}

/// Read/write access to per-user cart rows.
#[allow(async_fn_in_trait)]
pub trait CartStore {
    /// Fetch all cart rows for a user.
    async fn list_cart_entries(&self, user: UserId) -> Result<Vec<CartEntry>, StoreError>;

    /// Create or overwrite the (user, product) row with the given quantity.
    async fn upsert_cart_entry(
        &self,
        user: UserId,
        product: ProductId,
        quantity: NonZeroU32,
    ) -> Result<(), StoreError>;

    /// Overwrite the quantity of an existing (user, product) row.
    async fn update_cart_entry_quantity(
        &self,
        user: UserId,
        product: ProductId,
        quantity: NonZeroU32,
    ) -> Result<(), StoreError>;

    /// Delete the (user, product) row if it exists.
    async fn delete_cart_entry(&self, user: UserId, product: ProductId) -> Result<(), StoreError>;
}
