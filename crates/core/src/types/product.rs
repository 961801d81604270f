//! Catalog product snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::id::ProductId;
use super::price::Price;

/// Stock level below which the UI shows an "Only N left" badge.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A purchasable product from the remote catalog.
///
/// Products are read-only from the client's perspective: they are created and
/// destroyed externally, and this crate only works with snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned opaque ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Longer description shown on product cards.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image_url: String,
    /// Category for filtering.
    pub category: Category,
    /// Units currently in stock.
    pub stock_quantity: u32,
    /// Creation timestamp; the catalog's base order is newest first.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the "Only N left" badge applies.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock_quantity < LOW_STOCK_THRESHOLD
    }

    /// Whether the product can be added to a cart at all.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}
