//! Cart reconciliation tests against the in-memory store.

mod common;

use common::{InMemoryStore, RecordingNotifier, product};

use stylehub_core::{Category, UserId};
use stylehub_storefront::error::CartError;
use stylehub_storefront::notify::Severity;
use stylehub_storefront::services::CartService;

fn service() -> (
    CartService<InMemoryStore, RecordingNotifier>,
    InMemoryStore,
    RecordingNotifier,
) {
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::new();
    let service = CartService::new(store.clone(), notifier.clone());
    (service, store, notifier)
}

#[tokio::test]
async fn add_without_user_is_rejected_before_any_store_call() {
    let (service, store, notifier) = service();
    let shirt = product("Red Shirt", Category::Fashion, 20, 5);

    let result = service.add(None, &shirt, 0).await;

    assert!(matches!(result, Err(CartError::Unauthenticated)));
    assert_eq!(store.write_calls(), 0);
    assert!(notifier.has("Please sign in", Severity::Error));
}

#[tokio::test]
async fn set_quantity_without_user_is_rejected_silently() {
    let (service, store, notifier) = service();
    let shirt = product("Red Shirt", Category::Fashion, 20, 5);

    let result = service.set_quantity(None, &shirt, 2).await;

    assert!(matches!(result, Err(CartError::Unauthenticated)));
    assert_eq!(store.write_calls(), 0);
    // Only the add path prompts the user to sign in
    assert!(notifier.is_empty());
}

#[tokio::test]
async fn add_upserts_current_quantity_plus_one() {
    let (mut service, store, notifier) = service();
    let user = UserId::random();
    let shirt = product("Red Shirt", Category::Fashion, 20, 5);
    store.seed_row(user, shirt.id, 2);

    service
        .add(Some(user), &shirt, 2)
        .await
        .expect("add succeeds");

    assert_eq!(store.row(user, shirt.id), Some(3));
    assert!(notifier.has("Added to cart", Severity::Success));

    // The local index only changes once the caller refreshes
    assert_eq!(service.quantity(shirt.id), 0);
    service.refresh(Some(user)).await.expect("refresh succeeds");
    assert_eq!(service.quantity(shirt.id), 3);
}

#[tokio::test]
async fn add_is_rejected_for_out_of_stock_products() {
    let (service, store, notifier) = service();
    let user = UserId::random();
    let gone = product("Sold Out Hat", Category::Fashion, 15, 0);

    let result = service.add(Some(user), &gone, 0).await;

    assert!(matches!(
        result,
        Err(CartError::InsufficientStock {
            requested: 1,
            available: 0
        })
    ));
    assert_eq!(store.write_calls(), 0);
    assert!(notifier.has("Not enough stock", Severity::Error));
}

#[tokio::test]
async fn increment_is_rejected_at_the_stock_limit() {
    let (service, store, _notifier) = service();
    let user = UserId::random();
    let last_one = product("Last Hat", Category::Fashion, 15, 1);
    store.seed_row(user, last_one.id, 1);

    let result = service.set_quantity(Some(user), &last_one, 2).await;

    assert!(matches!(
        result,
        Err(CartError::InsufficientStock {
            requested: 2,
            available: 1
        })
    ));
    assert_eq!(store.write_calls(), 0);
    assert_eq!(store.row(user, last_one.id), Some(1));
}

#[tokio::test]
async fn decrement_to_zero_deletes_the_row() {
    let (mut service, store, _notifier) = service();
    let user = UserId::random();
    let last_one = product("Last Hat", Category::Fashion, 15, 1);
    store.seed_row(user, last_one.id, 1);

    service
        .set_quantity(Some(user), &last_one, 0)
        .await
        .expect("delete succeeds");

    // The row is absent, never a zero-valued row
    assert_eq!(store.row(user, last_one.id), None);

    service.refresh(Some(user)).await.expect("refresh succeeds");
    assert_eq!(service.quantity(last_one.id), 0);
}

#[tokio::test]
async fn refresh_rebuilds_the_index_wholesale() {
    let (mut service, store, _notifier) = service();
    let user = UserId::random();
    let shirt = product("Red Shirt", Category::Fashion, 20, 5);
    let hat = product("Blue Hat", Category::Fashion, 15, 5);

    store.seed_row(user, shirt.id, 2);
    store.seed_row(user, hat.id, 1);
    service.refresh(Some(user)).await.expect("refresh succeeds");
    assert_eq!(service.quantity(shirt.id), 2);
    assert_eq!(service.quantity(hat.id), 1);

    // Another session removes the shirt and bumps the hat
    service
        .set_quantity(Some(user), &shirt, 0)
        .await
        .expect("delete succeeds");
    service
        .set_quantity(Some(user), &hat, 4)
        .await
        .expect("update succeeds");

    service.refresh(Some(user)).await.expect("refresh succeeds");
    assert_eq!(service.quantity(shirt.id), 0);
    assert_eq!(service.quantity(hat.id), 4);
}

#[tokio::test]
async fn refresh_only_sees_rows_for_the_given_user() {
    let (mut service, store, _notifier) = service();
    let shopper = UserId::random();
    let someone_else = UserId::random();
    let shirt = product("Red Shirt", Category::Fashion, 20, 5);

    store.seed_row(someone_else, shirt.id, 3);

    service
        .refresh(Some(shopper))
        .await
        .expect("refresh succeeds");
    assert_eq!(service.quantity(shirt.id), 0);
}

#[tokio::test]
async fn sign_out_clears_the_index_without_a_store_call() {
    let (mut service, store, _notifier) = service();
    let user = UserId::random();
    let shirt = product("Red Shirt", Category::Fashion, 20, 5);
    store.seed_row(user, shirt.id, 2);
    service.refresh(Some(user)).await.expect("refresh succeeds");

    let reads_before = store.read_calls();
    service.refresh(None).await.expect("refresh succeeds");

    assert!(service.index().is_empty());
    assert_eq!(store.read_calls(), reads_before);
}

#[tokio::test]
async fn failed_write_leaves_local_state_untouched() {
    let (mut service, store, notifier) = service();
    let user = UserId::random();
    let shirt = product("Red Shirt", Category::Fashion, 20, 5);
    store.seed_row(user, shirt.id, 2);
    service.refresh(Some(user)).await.expect("refresh succeeds");

    store.fail_writes(true);
    let result = service.set_quantity(Some(user), &shirt, 3).await;

    assert!(matches!(result, Err(CartError::StoreWrite(_))));
    assert_eq!(service.quantity(shirt.id), 2);
    assert_eq!(store.row(user, shirt.id), Some(2));
    assert!(notifier.has("Error", Severity::Error));
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_index() {
    let (mut service, store, _notifier) = service();
    let user = UserId::random();
    let shirt = product("Red Shirt", Category::Fashion, 20, 5);
    store.seed_row(user, shirt.id, 2);
    service.refresh(Some(user)).await.expect("refresh succeeds");

    store.fail_reads(true);
    let result = service.refresh(Some(user)).await;

    assert!(matches!(result, Err(CartError::StoreRead(_))));
    assert_eq!(service.quantity(shirt.id), 2);
}

// Two rapid mutations on the same entry race with no sequencing token; the
// last response to land wins. The assertion is consistency, not a winner.
#[tokio::test]
async fn concurrent_set_quantity_settles_on_one_of_the_requests() {
    let (mut service, store, _notifier) = service();
    let user = UserId::random();
    let shirt = product("Red Shirt", Category::Fashion, 20, 5);
    store.seed_row(user, shirt.id, 1);
    service.refresh(Some(user)).await.expect("refresh succeeds");

    let (first, second) = tokio::join!(
        service.set_quantity(Some(user), &shirt, 2),
        service.set_quantity(Some(user), &shirt, 3),
    );
    first.expect("first update succeeds");
    second.expect("second update succeeds");

    service.refresh(Some(user)).await.expect("refresh succeeds");

    let settled = service.quantity(shirt.id);
    assert!(settled == 2 || settled == 3, "settled on {settled}");
    // Local index and remote row agree after the refresh
    assert_eq!(store.row(user, shirt.id), Some(settled));
}
