//! Cart operation errors.
//!
//! Every failure is recovered at the operation boundary: surfaced through the
//! notification sink, logged, and returned to the caller. Nothing here is
//! fatal to the process.

use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by cart reconciliation operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No current user; cart operations require one.
    #[error("not signed in")]
    Unauthenticated,

    /// Fetching cart rows from the remote store failed.
    #[error("failed to read cart from store: {0}")]
    StoreRead(#[source] StoreError),

    /// Writing a cart row to the remote store failed.
    #[error("failed to write cart to store: {0}")]
    StoreWrite(#[source] StoreError),

    /// The requested quantity exceeds the product's stock.
    #[error("requested quantity {requested} exceeds available stock {available}")]
    InsufficientStock { requested: u32, available: u32 },
}

impl CartError {
    /// Whether the failure came from the remote store (as opposed to a
    /// client-side policy rejection).
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(self, Self::StoreRead(_) | Self::StoreWrite(_))
    }
}
