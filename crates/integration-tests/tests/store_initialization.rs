//! Integration tests for object store initialization and round-trips.

use chrono::NaiveDate;

use lunchbox_client::models::{LunchItem, Order, User};
use lunchbox_core::{Email, ItemId, OrderId, OrderStatus, Price, UserId};
use lunchbox_integration_tests::{fresh_store, seeded_store};

// =============================================================================
// Initialization
// =============================================================================

#[tokio::test]
async fn test_initialize_twice_concurrently_is_idempotent() {
    let store = fresh_store().await;

    // The store is already initialized once by open_in_memory; hammer it
    // again from two concurrent callers.
    let (a, b) = tokio::join!(store.initialize(), store.initialize());
    a.expect("first initialize");
    b.expect("second initialize");

    // Collections are intact and usable.
    assert!(store.items().list().await.expect("items").is_empty());
    assert!(store.orders().list().await.expect("orders").is_empty());
    assert!(store.users().list().await.expect("users").is_empty());
}

#[tokio::test]
async fn test_initialize_preserves_existing_data() {
    let store = seeded_store().await;

    store.initialize().await.expect("re-initialize");

    assert_eq!(store.items().list().await.expect("items").len(), 6);
    assert_eq!(store.users().list().await.expect("users").len(), 3);
}

// =============================================================================
// Round-trips
// =============================================================================

#[tokio::test]
async fn test_item_round_trip() {
    let store = fresh_store().await;

    let item = LunchItem {
        id: ItemId::new("42"),
        name: "Soup of the Day".to_owned(),
        price: Price::from_cents(899),
        description: Some("Ask the kitchen".to_owned()),
        category: Some("Mains".to_owned()),
        available: false,
    };

    store.items().put(&item).await.expect("put");
    let loaded = store.items().get(&item.id).await.expect("get");

    assert_eq!(loaded, Some(item));
}

#[tokio::test]
async fn test_sub_cent_price_round_trips_exactly() {
    let store = fresh_store().await;

    // Prices are not limited to two decimals; the stored amount must
    // come back exactly, not rounded to the display form.
    let item = LunchItem {
        id: ItemId::new("43"),
        name: "Bulk Rice".to_owned(),
        price: Price::parse("12.999").expect("valid price"),
        description: None,
        category: Some("Pantry".to_owned()),
        available: true,
    };

    store.items().put(&item).await.expect("put");
    let loaded = store.items().get(&item.id).await.expect("get");

    assert_eq!(loaded, Some(item));
}

#[tokio::test]
async fn test_order_round_trip() {
    let store = fresh_store().await;

    let items = vec![
        LunchItem {
            id: ItemId::new("1"),
            name: "Caesar Salad".to_owned(),
            price: Price::from_cents(1299),
            description: Some("Fresh romaine".to_owned()),
            category: Some("Salads".to_owned()),
            available: true,
        },
        LunchItem {
            id: ItemId::new("2"),
            name: "Bulk Rice".to_owned(),
            price: Price::parse("12.999").expect("valid price"),
            description: None,
            category: None,
            available: false,
        },
    ];
    let order = Order {
        id: OrderId::new("order-7"),
        user_id: UserId::new("user-1"),
        user_name: "John Doe".to_owned(),
        date: NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date"),
        items: items.clone(),
        total_amount: items.iter().map(|i| i.price).sum(),
        status: OrderStatus::Pending,
    };

    store.orders().put(&order).await.expect("put");
    let loaded = store.orders().get(&order.id).await.expect("get");

    assert_eq!(loaded, Some(order));
}

#[tokio::test]
async fn test_user_round_trip() {
    let store = fresh_store().await;

    let user = User {
        id: UserId::new("user-9"),
        name: "Ada".to_owned(),
        email: Email::parse("ada@company.com").expect("valid email"),
        is_admin: true,
    };

    store.users().put(&user).await.expect("put");
    let loaded = store.users().get(&user.id).await.expect("get");

    assert_eq!(loaded, Some(user));
}

#[tokio::test]
async fn test_put_is_an_upsert() {
    let store = fresh_store().await;

    let mut item = LunchItem {
        id: ItemId::new("1"),
        name: "Caesar Salad".to_owned(),
        price: Price::from_cents(1299),
        description: None,
        category: None,
        available: true,
    };
    store.items().put(&item).await.expect("insert");

    item.price = Price::from_cents(1399);
    item.available = false;
    store.items().put(&item).await.expect("replace");

    let items = store.items().list().await.expect("list");
    assert_eq!(items.len(), 1);
    assert_eq!(items.first(), Some(&item));
}

#[tokio::test]
async fn test_deleted_item_is_excluded_from_list() {
    let store = fresh_store().await;

    let item = LunchItem {
        id: ItemId::new("1"),
        name: "X".to_owned(),
        price: Price::from_cents(100),
        description: None,
        category: None,
        available: true,
    };
    store.items().put(&item).await.expect("put");
    store.items().delete(&item.id).await.expect("delete");

    let items = store.items().list().await.expect("list");
    assert!(items.iter().all(|i| i.id != item.id));
    assert!(items.is_empty());
}
