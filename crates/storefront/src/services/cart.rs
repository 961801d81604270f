//! Cart reconciliation service.
//!
//! Tracks, for the current user, a product-to-quantity index backed by remote
//! cart rows. Mutations are read-modify-write against the store; the local
//! index is never updated optimistically. After a confirmed write the caller
//! refreshes, which rebuilds the index wholesale from the store's rows.
//!
//! # Concurrency
//!
//! There is no mutual exclusion across concurrent mutations on one entry: if
//! two writes race, the last response to land wins. The UI mitigates this by
//! disabling a product's controls while its request is in flight; this
//! service stays consistent regardless of response ordering because the index
//! only ever changes on a refresh.

use std::num::NonZeroU32;

use tracing::instrument;

use stylehub_core::{CartIndex, Product, ProductId, UserId};

use crate::error::CartError;
use crate::notify::{NotificationSink, Severity};
use crate::store::CartStore;

/// Cart reconciliation service.
///
/// All operations take the current user explicitly; absent a user they fail
/// with [`CartError::Unauthenticated`] and perform no store access.
pub struct CartService<S, N> {
    store: S,
    notifier: N,
    index: CartIndex,
}

impl<S: CartStore, N: NotificationSink> CartService<S, N> {
    /// Create a service with an empty index.
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            index: CartIndex::new(),
        }
    }

    /// The local quantity index, as of the last successful refresh.
    #[must_use]
    pub const fn index(&self) -> &CartIndex {
        &self.index
    }

    /// The cart quantity for a product, or 0 if it has no entry.
    #[must_use]
    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.index.get(product_id)
    }

    /// Add one unit of a product to the cart.
    ///
    /// Upserts the (user, product) row with `current_quantity + 1`, where
    /// `current_quantity` is the caller's snapshot of the displayed quantity.
    /// Re-issuing with a correct snapshot converges to the same row; two adds
    /// racing on a stale snapshot lose one update (see the module docs).
    ///
    /// # Errors
    ///
    /// - [`CartError::Unauthenticated`] if there is no current user (also
    ///   prompts the user to sign in)
    /// - [`CartError::InsufficientStock`] if the new quantity would exceed
    ///   the product's stock (covers out-of-stock products)
    /// - [`CartError::StoreWrite`] if the store write fails
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add(
        &self,
        user: Option<UserId>,
        product: &Product,
        current_quantity: u32,
    ) -> Result<(), CartError> {
        let Some(user) = user else {
            self.notifier.notify(
                "Please sign in",
                "You need to be logged in to add items to cart",
                Severity::Error,
            );
            return Err(CartError::Unauthenticated);
        };

        // current_quantity + 1, saturating and non-zero by construction
        let new_quantity = NonZeroU32::MIN.saturating_add(current_quantity);
        self.check_stock(product, new_quantity.get())?;

        match self
            .store
            .upsert_cart_entry(user, product.id, new_quantity)
            .await
        {
            Ok(()) => {
                self.notifier.notify(
                    "Added to cart",
                    &format!("{} has been added to your cart", product.name),
                    Severity::Success,
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to add item to cart: {e}");
                self.notifier
                    .notify("Error", "Failed to add item to cart", Severity::Error);
                Err(CartError::StoreWrite(e))
            }
        }
    }

    /// Set the cart quantity for a product.
    ///
    /// A quantity of 0 deletes the row (absence means zero; a zero-valued row
    /// is never written). Used for both increment and decrement by passing
    /// the displayed quantity plus or minus one.
    ///
    /// # Errors
    ///
    /// - [`CartError::Unauthenticated`] if there is no current user
    /// - [`CartError::InsufficientStock`] if `new_quantity` exceeds stock
    /// - [`CartError::StoreWrite`] if the store write fails
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn set_quantity(
        &self,
        user: Option<UserId>,
        product: &Product,
        new_quantity: u32,
    ) -> Result<(), CartError> {
        let Some(user) = user else {
            return Err(CartError::Unauthenticated);
        };

        let result = match NonZeroU32::new(new_quantity) {
            None => self.store.delete_cart_entry(user, product.id).await,
            Some(quantity) => {
                self.check_stock(product, new_quantity)?;
                self.store
                    .update_cart_entry_quantity(user, product.id, quantity)
                    .await
            }
        };

        result.map_err(|e| {
            tracing::error!("Failed to update cart: {e}");
            self.notifier
                .notify("Error", "Failed to update cart", Severity::Error);
            CartError::StoreWrite(e)
        })
    }

    /// Rebuild the local index from the user's remote cart rows.
    ///
    /// The index is replaced wholesale, never patched, so after a successful
    /// refresh it reflects exactly the last confirmed remote state. With no
    /// current user the index is simply cleared.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::StoreRead`] if the fetch fails; the previous
    /// index is left untouched.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self, user: Option<UserId>) -> Result<(), CartError> {
        let Some(user) = user else {
            self.index = CartIndex::new();
            return Ok(());
        };

        match self.store.list_cart_entries(user).await {
            Ok(entries) => {
                self.index = CartIndex::from_entries(entries);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to fetch cart: {e}");
                self.notifier
                    .notify("Error", "Failed to load cart", Severity::Error);
                Err(CartError::StoreRead(e))
            }
        }
    }

    /// Reject quantities the product's stock cannot cover.
    fn check_stock(&self, product: &Product, requested: u32) -> Result<(), CartError> {
        if requested > product.stock_quantity {
            self.notifier.notify(
                "Not enough stock",
                &format!("Only {} of {} available", product.stock_quantity, product.name),
                Severity::Error,
            );
            return Err(CartError::InsufficientStock {
                requested,
                available: product.stock_quantity,
            });
        }
        Ok(())
    }
}
