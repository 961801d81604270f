//! Shared test doubles: an in-memory store with failure injection and call
//! counters, and a notifier that records what it was asked to show.

// Compiled into each test binary; not every binary uses every helper
#![allow(dead_code)]

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rust_decimal::Decimal;

use stylehub_core::{CartEntry, Category, CurrencyCode, Price, Product, ProductId, UserId};
use stylehub_storefront::notify::{NotificationSink, Severity};
use stylehub_storefront::store::{CartStore, CatalogStore, StoreError};

/// Build a product for tests.
pub fn product(name: &str, category: Category, price: i64, stock: u32) -> Product {
    Product {
        id: ProductId::random(),
        name: name.to_string(),
        description: format!("Description of {name}"),
        price: Price::new(Decimal::from(price), CurrencyCode::USD).expect("valid price"),
        image_url: format!("https://cdn.example.com/{name}.jpg"),
        category,
        stock_quantity: stock,
        created_at: Utc::now(),
    }
}

/// In-memory catalog/cart store.
///
/// Clones share state, so a test can hand one clone to a service and keep
/// another for seeding rows and asserting on calls.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    products: Vec<Product>,
    cart: HashMap<(UserId, ProductId), NonZeroU32>,
    fail_reads: bool,
    fail_writes: bool,
    read_calls: usize,
    write_calls: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_products(&self, products: Vec<Product>) {
        self.inner.lock().expect("store lock").products = products;
    }

    /// Seed a cart row directly, bypassing the service under test.
    pub fn seed_row(&self, user: UserId, product: ProductId, quantity: u32) {
        let quantity = NonZeroU32::new(quantity).expect("positive quantity");
        self.inner
            .lock()
            .expect("store lock")
            .cart
            .insert((user, product), quantity);
    }

    /// The remote quantity for a (user, product) row, or `None` if absent.
    pub fn row(&self, user: UserId, product: ProductId) -> Option<u32> {
        self.inner
            .lock()
            .expect("store lock")
            .cart
            .get(&(user, product))
            .map(|q| q.get())
    }

    pub fn fail_reads(&self, fail: bool) {
        self.inner.lock().expect("store lock").fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().expect("store lock").fail_writes = fail;
    }

    pub fn read_calls(&self) -> usize {
        self.inner.lock().expect("store lock").read_calls
    }

    pub fn write_calls(&self) -> usize {
        self.inner.lock().expect("store lock").write_calls
    }

    fn injected_failure() -> StoreError {
        StoreError::Status {
            status: 500,
            body: "injected failure".to_string(),
        }
    }
}

impl CatalogStore for InMemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.read_calls += 1;
        if inner.fail_reads {
            return Err(Self::injected_failure());
        }
        Ok(inner.products.clone())
    }
}

impl CartStore for InMemoryStore {
    async fn list_cart_entries(&self, user: UserId) -> Result<Vec<CartEntry>, StoreError> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.read_calls += 1;
        if inner.fail_reads {
            return Err(Self::injected_failure());
        }
        Ok(inner
            .cart
            .iter()
            .filter(|((row_user, _), _)| *row_user == user)
            .map(|((_, product_id), quantity)| CartEntry {
                user_id: user,
                product_id: *product_id,
                quantity: *quantity,
            })
            .collect())
    }

    async fn upsert_cart_entry(
        &self,
        user: UserId,
        product: ProductId,
        quantity: NonZeroU32,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.write_calls += 1;
        if inner.fail_writes {
            return Err(Self::injected_failure());
        }
        inner.cart.insert((user, product), quantity);
        Ok(())
    }

    async fn update_cart_entry_quantity(
        &self,
        user: UserId,
        product: ProductId,
        quantity: NonZeroU32,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.write_calls += 1;
        if inner.fail_writes {
            return Err(Self::injected_failure());
        }
        // PATCH on a missing row matches zero rows and still succeeds
        if let Some(existing) = inner.cart.get_mut(&(user, product)) {
            *existing = quantity;
        }
        Ok(())
    }

    async fn delete_cart_entry(&self, user: UserId, product: ProductId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.write_calls += 1;
        if inner.fail_writes {
            return Err(Self::injected_failure());
        }
        inner.cart.remove(&(user, product));
        Ok(())
    }
}

/// Notifier that records every notification for assertions.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<(String, String, Severity)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notifications
            .lock()
            .expect("notifier lock")
            .iter()
            .map(|(title, _, _)| title.clone())
            .collect()
    }

    pub fn has(&self, title: &str, severity: Severity) -> bool {
        self.notifications
            .lock()
            .expect("notifier lock")
            .iter()
            .any(|(t, _, s)| t == title && *s == severity)
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.lock().expect("notifier lock").is_empty()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, title: &str, message: &str, severity: Severity) {
        self.notifications
            .lock()
            .expect("notifier lock")
            .push((title.to_string(), message.to_string(), severity));
    }
}
