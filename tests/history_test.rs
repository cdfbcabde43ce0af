use std::path::Path;

use chrono::{TimeZone, Utc};

use storefront_rs::catalog::{load_catalog, Catalog, TOP_RATED_COUNT};
use storefront_rs::checkout::{
    filter_orders, order_history, place_order, CheckoutRequest, ManualClock, OrderStatus,
    OrderTracker,
};
use storefront_rs::models::{DeliveryDetails, HistoryStatus, PaymentMethod};
use storefront_rs::pricing::{PricingConfig, Tip};
use storefront_rs::state::{CartStore, LineRequest, MemoryStorage, UserSession};

fn shipped_catalog() -> Catalog {
    load_catalog(Path::new(env!("CARGO_MANIFEST_DIR")).join("catalog.json")).unwrap()
}

#[test]
fn test_top_rated_from_shipped_catalog() {
    let catalog = shipped_catalog();
    let top: Vec<&str> = catalog
        .top_rated(TOP_RATED_COUNT)
        .iter()
        .map(|r| r.id.as_str())
        .collect();

    assert_eq!(top, vec!["r4", "r1", "r5", "r2"]);
}

#[test]
fn test_shipped_history_filters() {
    let catalog = shipped_catalog();
    let orders = &catalog.orders;
    assert_eq!(filter_orders(orders, "", None).len(), orders.len());

    let spice = filter_orders(orders, "SPICE", None);
    assert_eq!(spice.len(), 1);
    assert_eq!(spice[0].restaurant_id, "r1");

    let cancelled = filter_orders(orders, "", Some(HistoryStatus::Cancelled));
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].id, "ORD-729114");

    assert!(filter_orders(orders, "ord-7291", Some(HistoryStatus::Delivered)).is_empty());
}

#[test]
fn test_placed_order_joins_history_with_live_status() {
    let catalog = shipped_catalog();
    let storage = MemoryStorage::new();
    let mut store = CartStore::init(storage.clone(), PricingConfig::default());
    let mut session = UserSession::init(storage, catalog.users.clone());
    assert!(session.login("rahul@example.com", "secret"));

    let restaurant = catalog.require_restaurant("r3").unwrap();
    let item = &catalog.menu("r3")[0];
    store.add_line_confirmed(LineRequest {
        restaurant_id: &restaurant.id,
        restaurant_name: &restaurant.name,
        menu_item: item,
        quantity: 2,
        selected_options: Vec::new(),
        note: None,
    });

    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 7, 1, 18, 0, 0).unwrap());
    let request = CheckoutRequest {
        delivery: DeliveryDetails::from_user(session.user().unwrap()),
        payment_method: PaymentMethod::Cash,
        tip: Tip::Flat(0.0),
    };
    let order = place_order(&mut store, &session, request, &clock).unwrap();

    let tracker = OrderTracker::for_order(&order, &clock);
    let history = order_history(&catalog.orders, Some((&order, tracker.status())));
    assert_eq!(history.len(), catalog.orders.len() + 1);
    assert_eq!(history[0].id, order.id);
    assert_eq!(history[0].status, HistoryStatus::Confirmed);

    let found = filter_orders(&history, "dragon", Some(HistoryStatus::Confirmed));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, order.id);

    clock.advance(chrono::Duration::seconds(20));
    assert_eq!(tracker.status(), OrderStatus::Delivered);
    let later = order_history(&catalog.orders, Some((&order, tracker.status())));
    assert_eq!(later[0].status, HistoryStatus::Delivered);
}
