//! Catalog view service.
//!
//! Holds the catalog snapshot and the user-entered view criteria, and derives
//! the displayed product list from them. Deriving is a pure, synchronous
//! transform: it performs no I/O and is safe to re-run on every criteria
//! change.

use tracing::instrument;

use stylehub_core::{Category, Product};

use crate::store::CatalogStore;

/// Sort order for the derived product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Lexicographic by name, ascending. The UI default.
    #[default]
    NameAscending,
    /// Numeric by price, ascending.
    PriceLowToHigh,
    /// Numeric by price, descending.
    PriceHighToLow,
}

/// User-entered filter and sort criteria. Ephemeral, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCriteria {
    /// Free-text search over name and description. Empty matches everything.
    pub search: String,
    /// Category filter; `None` means "all categories".
    pub category: Option<Category>,
    /// Sort order applied after filtering.
    pub sort: SortKey,
}

impl ViewCriteria {
    /// Whether a product passes the search and category predicates.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = search.is_empty()
            || product.name.to_lowercase().contains(&search)
            || product.description.to_lowercase().contains(&search);

        let matches_category = self
            .category
            .as_ref()
            .is_none_or(|category| *category == product.category);

        matches_search && matches_category
    }
}

/// Derive the displayed product list from a catalog snapshot and criteria.
///
/// Filtering is the intersection of the search and category predicates;
/// sorting is stable, so price ties keep their relative filtered order.
#[must_use]
pub fn derive_product_list<'a>(
    products: &'a [Product],
    criteria: &ViewCriteria,
) -> Vec<&'a Product> {
    let mut filtered: Vec<&Product> = products
        .iter()
        .filter(|product| criteria.matches(product))
        .collect();

    match criteria.sort {
        SortKey::NameAscending => {
            // Case-insensitive stand-in for locale-aware collation
            filtered.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortKey::PriceLowToHigh => {
            filtered.sort_by(|a, b| a.price.amount().cmp(&b.price.amount()));
        }
        SortKey::PriceHighToLow => {
            filtered.sort_by(|a, b| b.price.amount().cmp(&a.price.amount()));
        }
    }

    filtered
}

/// Catalog view service.
///
/// Loads the product snapshot once per session (or user change) and answers
/// derived-list queries against it.
pub struct CatalogService<S> {
    store: S,
    products: Vec<Product>,
    criteria: ViewCriteria,
}

impl<S: CatalogStore> CatalogService<S> {
    /// Create a service with an empty snapshot and default criteria.
    pub fn new(store: S) -> Self {
        Self {
            store,
            products: Vec::new(),
            criteria: ViewCriteria::default(),
        }
    }

    /// Load the catalog from the store.
    ///
    /// On failure the snapshot degrades to an empty list; the failure is
    /// logged and not retried, so the rest of the UI stays usable.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        match self.store.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "Catalog loaded");
                self.products = products;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch catalog: {e}");
                self.products = Vec::new();
            }
        }
    }

    /// The raw catalog snapshot, base order (newest first).
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Total number of products in the snapshot (the "of Y" in
    /// "Showing X of Y products").
    #[must_use]
    pub fn total(&self) -> usize {
        self.products.len()
    }

    /// The current view criteria.
    #[must_use]
    pub const fn criteria(&self) -> &ViewCriteria {
        &self.criteria
    }

    /// Set the search term.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
    }

    /// Set the category filter; `None` means "all categories".
    pub fn set_category(&mut self, category: Option<Category>) {
        self.criteria.category = category;
    }

    /// Set the sort order.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.criteria.sort = sort;
    }

    /// Restore the default criteria (the "Clear Filters" button).
    pub fn reset_criteria(&mut self) {
        self.criteria = ViewCriteria::default();
    }

    /// The filtered, sorted product list for the current criteria.
    #[must_use]
    pub fn derived(&self) -> Vec<&Product> {
        derive_product_list(&self.products, &self.criteria)
    }
}
