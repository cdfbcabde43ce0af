use chrono::{Duration, TimeZone, Utc};

use storefront_rs::checkout::{place_order, CheckoutRequest, ManualClock, OrderStatus, OrderTracker};
use storefront_rs::error::CheckoutError;
use storefront_rs::models::{DeliveryDetails, MenuItem, PaymentMethod, User};
use storefront_rs::pricing::{PricingConfig, Tip};
use storefront_rs::state::{
    AddOutcome, CartStore, FileStorage, KeyValueStore, LineRequest, MemoryStorage, SessionCache,
    UserSession, CART_KEY, RESTAURANT_ID_KEY,
};

fn dish(id: &str, price: f64) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: format!("Dish {}", id),
        description: String::new(),
        price,
        image_url: String::new(),
        category: "Mains".to_string(),
        options: Vec::new(),
        popular: false,
        vegetarian: false,
        vegan: false,
        gluten_free: false,
    }
}

fn line<'a>(restaurant: &'a str, item: &'a MenuItem, quantity: i64) -> LineRequest<'a> {
    LineRequest {
        restaurant_id: restaurant,
        restaurant_name: restaurant,
        menu_item: item,
        quantity,
        selected_options: Vec::new(),
        note: None,
    }
}

fn added(outcome: AddOutcome) -> String {
    match outcome {
        AddOutcome::Added(id) => id,
        other => panic!("expected a line to be added, got {:?}", other),
    }
}

fn users() -> Vec<User> {
    vec![User {
        id: "user1".to_string(),
        name: "Rahul Sharma".to_string(),
        email: "rahul@example.com".to_string(),
        phone: Some("9876543210".to_string()),
        address: Some("12 Pali Hill, Mumbai".to_string()),
    }]
}

#[test]
fn test_adding_non_positive_quantity_never_grows_cart() {
    let mut store = CartStore::init(MemoryStorage::new(), PricingConfig::default());
    let item = dish("a", 100.0);
    store.add_line(line("r1", &item, 2), |_| true);

    for quantity in [0, -1, -50] {
        let outcome = store.add_line(line("r1", &item, quantity), |_| true);
        assert_eq!(outcome, AddOutcome::Ignored);
        assert_eq!(store.item_count(), 2);
    }
}

#[test]
fn test_update_to_zero_removes_line_and_its_quantity() {
    let mut store = CartStore::init(MemoryStorage::new(), PricingConfig::default());
    let a = dish("a", 100.0);
    let b = dish("b", 50.0);
    added(store.add_line(line("r1", &a, 2), |_| true));
    let b_id = added(store.add_line(line("r1", &b, 3), |_| true));
    assert_eq!(store.item_count(), 5);

    store.update_quantity(&b_id, 0);

    assert_eq!(store.cart().line_count(), 1);
    assert_eq!(store.item_count(), 2);
}

#[test]
fn test_switching_restaurant_after_confirmation() {
    let mut store = CartStore::init(MemoryStorage::new(), PricingConfig::default());
    let a1 = dish("a1", 100.0);
    let a2 = dish("a2", 120.0);
    let b1 = dish("b1", 90.0);
    store.add_line(line("A", &a1, 1), |_| true);
    store.add_line(line("A", &a2, 2), |_| true);

    let mut asked = false;
    let id = added(store.add_line(line("B", &b1, 1), |_| {
        asked = true;
        true
    }));

    assert!(asked);
    assert_eq!(store.cart().line_count(), 1);
    assert_eq!(store.cart().lines()[0].id, id);
    assert_eq!(store.cart().lines()[0].menu_item.id, "b1");
    assert_eq!(store.restaurant().unwrap().id, "B");
}

#[test]
fn test_state_survives_reload_through_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let item = dish("a", 100.0);

    let line_id = {
        let mut store = CartStore::init(FileStorage::new(&path), PricingConfig::default());
        let id = added(store.add_line(line("r1", &item, 1), |_| true));
        store.update_quantity(&id, 4);
        id
    };

    let store = CartStore::restore(FileStorage::new(&path), PricingConfig::default());
    assert_eq!(store.item_count(), 4);
    assert_eq!(store.cart().lines()[0].id, line_id);
    assert_eq!(store.restaurant().unwrap().id, "r1");
}

#[test]
fn test_removal_survives_reload_through_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let a = dish("a", 100.0);
    let b = dish("b", 60.0);

    {
        let mut store = CartStore::init(FileStorage::new(&path), PricingConfig::default());
        let a_id = added(store.add_line(line("r1", &a, 2), |_| true));
        added(store.add_line(line("r1", &b, 1), |_| true));
        store.remove_line(&a_id);
    }

    let mut store = CartStore::restore(FileStorage::new(&path), PricingConfig::default());
    assert_eq!(store.cart().line_count(), 1);
    assert_eq!(store.cart().lines()[0].menu_item.id, "b");

    let last = store.cart().lines()[0].id.clone();
    store.remove_line(&last);

    let storage = FileStorage::new(&path);
    assert!(storage.get(RESTAURANT_ID_KEY).is_none());
    let reloaded = CartStore::restore(storage, PricingConfig::default());
    assert!(reloaded.cart().is_empty());
    assert!(reloaded.restaurant().is_none());
}

#[test]
fn test_corrupt_persisted_cart_restores_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("session.json"));
    storage.set(CART_KEY, "[{\"id\": truncated");
    storage.set("restaurantId", "r1");

    let store = CartStore::restore(storage.clone(), PricingConfig::default());

    assert!(store.cart().is_empty());
    assert_eq!(store.get_total(), 0.0);
    assert!(storage.get(CART_KEY).is_none());
}

#[test]
fn test_checkout_places_order_and_clears_cart() {
    let storage = MemoryStorage::new();
    let mut store = CartStore::init(storage.clone(), PricingConfig::default());
    let mut session = UserSession::init(storage.clone(), users());
    assert!(session.login("rahul@example.com", "secret"));

    let item = dish("a", 200.0);
    store.add_line(line("r1", &item, 2), |_| true);
    let expected_total = store.get_total() + 40.0;

    let start = Utc.with_ymd_and_hms(2024, 6, 1, 19, 30, 0).unwrap();
    let clock = ManualClock::new(start);
    let request = CheckoutRequest {
        delivery: DeliveryDetails::from_user(session.user().unwrap()),
        payment_method: PaymentMethod::Cash,
        tip: Tip::Percent(10.0),
    };

    let order = place_order(&mut store, &session, request, &clock).unwrap();

    assert!(order.id.starts_with("ORD-"));
    assert_eq!(order.user_id, "user1");
    assert_eq!(order.restaurant_id, "r1");
    assert_eq!(order.lines.len(), 1);
    assert!((order.tip - 40.0).abs() < 1e-9);
    assert!((order.total - expected_total).abs() < 1e-9);
    assert_eq!(order.estimated_delivery - order.created_at, Duration::minutes(40));
    assert_eq!(order.delivery.address, "12 Pali Hill, Mumbai");

    assert!(store.cart().is_empty());
    assert!(storage.get(CART_KEY).is_none());
    assert!(session.is_authenticated());
}

#[test]
fn test_checkout_rejects_empty_cart() {
    let storage = MemoryStorage::new();
    let mut store = CartStore::init(storage.clone(), PricingConfig::default());
    let mut session = UserSession::init(storage, users());
    session.login("rahul@example.com", "secret");

    let clock = ManualClock::new(Utc::now());
    let request = CheckoutRequest {
        delivery: DeliveryDetails::from_user(session.user().unwrap()),
        payment_method: PaymentMethod::Credit,
        tip: Tip::default(),
    };

    let err = place_order(&mut store, &session, request, &clock).unwrap_err();
    assert_eq!(err, CheckoutError::EmptyCart);
}

#[test]
fn test_last_order_tracks_to_delivery() {
    let storage = MemoryStorage::new();
    let mut store = CartStore::init(storage.clone(), PricingConfig::default());
    let mut session = UserSession::init(storage.clone(), users());
    session.login("rahul@example.com", "secret");
    let item = dish("a", 150.0);
    store.add_line(line("r1", &item, 1), |_| true);

    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap());
    let request = CheckoutRequest {
        delivery: DeliveryDetails::from_user(session.user().unwrap()),
        payment_method: PaymentMethod::Paypal,
        tip: Tip::Flat(0.0),
    };
    let order = place_order(&mut store, &session, request, &clock).unwrap();
    store.cache().persist_last_order(&order);

    let cache = SessionCache::new(storage);
    let saved = cache.last_order().unwrap();
    assert_eq!(saved, order);

    let tracker = OrderTracker::for_order(&saved, &clock);
    assert_eq!(tracker.status(), OrderStatus::Confirmed);
    clock.advance(Duration::seconds(12));
    assert_eq!(tracker.status(), OrderStatus::OutForDelivery);
    clock.advance(Duration::seconds(3));
    assert!(tracker.is_delivered());
}
