//! Cart entries and the local cart index.
//!
//! A cart entry exists remotely per (user, product) with a positive quantity;
//! a quantity of zero is represented by the entry being absent, never by a
//! zero-valued row. [`CartEntry`] encodes that invariant with [`NonZeroU32`].

use std::collections::HashMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::id::{ProductId, UserId};

/// A single remote cart row for a (user, product) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub user_id: UserId,
    pub product_id: ProductId,
    /// Always positive; absence of the row means zero.
    pub quantity: NonZeroU32,
}

/// The local product-id to quantity index.
///
/// This is a transient cache of the remote cart rows and is never
/// authoritative: it is rebuilt from scratch after every confirmed mutation,
/// replacing the whole mapping rather than patching entries in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartIndex {
    quantities: HashMap<ProductId, NonZeroU32>,
}

impl CartIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a set of remote cart rows.
    ///
    /// Later duplicates for the same product win, matching the remote store's
    /// upsert semantics; well-formed row sets never contain duplicates.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = CartEntry>) -> Self {
        Self {
            quantities: entries
                .into_iter()
                .map(|entry| (entry.product_id, entry.quantity))
                .collect(),
        }
    }

    /// The cart quantity for a product, or 0 if it has no entry.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> u32 {
        self.quantities
            .get(&product_id)
            .map_or(0, |quantity| quantity.get())
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.quantities.values().map(|quantity| quantity.get()).sum()
    }
}
