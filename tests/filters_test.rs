use storefront_rs::catalog::{apply_filters, FilterState, SortKey};
use storefront_rs::models::Restaurant;

#[allow(clippy::too_many_arguments)]
fn make_restaurant(
    id: &str,
    name: &str,
    cuisine: &[&str],
    rating: f64,
    delivery_time: &str,
    delivery_fee: f64,
    min_order: f64,
    distance: f64,
) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: name.to_string(),
        image_url: String::new(),
        cuisine: cuisine.iter().map(|c| c.to_string()).collect(),
        rating,
        delivery_time: delivery_time.to_string(),
        delivery_fee,
        min_order,
        address: String::new(),
        distance,
    }
}

fn sample_restaurants() -> Vec<Restaurant> {
    vec![
        make_restaurant("r1", "Spice Route", &["Indian", "North Indian"], 4.6, "25-35 min", 29.0, 199.0, 2.4),
        make_restaurant("r2", "Napoli Express", &["Italian", "Pizza"], 4.3, "30-40 min", 39.0, 249.0, 3.8),
        make_restaurant("r3", "Dragon Wok", &["Chinese"], 4.1, "20-30 min", 19.0, 149.0, 1.6),
        make_restaurant("r4", "Green Bowl", &["Healthy", "Vegan"], 4.7, "15-25 min", 49.0, 299.0, 5.1),
        make_restaurant("r5", "Dosa Corner", &["South Indian", "Indian"], 4.4, "20-30 min", 25.0, 99.0, 0.9),
    ]
}

fn ids<'a>(list: &[&'a Restaurant]) -> Vec<&'a str> {
    list.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_no_filters_uses_recommended_order() {
    let restaurants = sample_restaurants();
    let result = apply_filters(&restaurants, "", &FilterState::default());

    // Scores: r1 4.36, r2 3.92, r3 3.94, r4 4.19, r5 4.31
    assert_eq!(ids(&result), vec!["r1", "r5", "r4", "r3", "r2"]);
}

#[test]
fn test_text_query_matches_name_or_cuisine() {
    let restaurants = sample_restaurants();
    let filters = FilterState::default();

    let by_cuisine = apply_filters(&restaurants, "indian", &filters);
    assert_eq!(by_cuisine.len(), 2);

    let by_name = apply_filters(&restaurants, "WOK", &filters);
    assert_eq!(ids(&by_name), vec!["r3"]);

    let none = apply_filters(&restaurants, "sushi", &filters);
    assert!(none.is_empty());
}

#[test]
fn test_text_query_is_not_trimmed() {
    let restaurants = sample_restaurants();
    let filters = FilterState::default();

    assert_eq!(ids(&apply_filters(&restaurants, "dragon ", &filters)), vec!["r3"]);
    assert!(apply_filters(&restaurants, "wok ", &filters).is_empty());
    assert!(apply_filters(&restaurants, "   ", &filters).is_empty());
}

#[test]
fn test_cuisine_facet_intersects() {
    let restaurants = sample_restaurants();
    let mut filters = FilterState::default();
    filters.toggle_cuisine("Pizza");
    filters.toggle_cuisine("Vegan");

    let result = apply_filters(&restaurants, "", &filters);
    let mut found = ids(&result);
    found.sort();
    assert_eq!(found, vec!["r2", "r4"]);
}

#[test]
fn test_cuisine_facet_is_exact_match() {
    let restaurants = sample_restaurants();
    let mut filters = FilterState::default();
    filters.toggle_cuisine("indian");

    assert!(apply_filters(&restaurants, "", &filters).is_empty());
}

#[test]
fn test_min_rating_and_sort_by_rating() {
    let restaurants = sample_restaurants();
    let mut filters = FilterState::default();
    filters.set_min_rating(4.4);
    filters.set_sort(SortKey::RatingHighToLow);

    let result = apply_filters(&restaurants, "", &filters);
    assert_eq!(ids(&result), vec!["r4", "r1", "r5"]);
}

#[test]
fn test_sort_by_delivery_time_is_stable() {
    let restaurants = sample_restaurants();
    let filters = FilterState {
        sort_by: SortKey::DeliveryTime,
        ..Default::default()
    };

    let result = apply_filters(&restaurants, "", &filters);
    // r3 and r5 tie at 20 minutes and keep catalog order.
    assert_eq!(ids(&result), vec!["r4", "r3", "r5", "r1", "r2"]);
}

#[test]
fn test_sort_by_fee_and_min_order() {
    let restaurants = sample_restaurants();
    let mut filters = FilterState::default();

    filters.set_sort(SortKey::DeliveryFeeLowToHigh);
    assert_eq!(
        ids(&apply_filters(&restaurants, "", &filters)),
        vec!["r3", "r5", "r1", "r2", "r4"]
    );

    filters.set_sort(SortKey::MinOrderLowToHigh);
    assert_eq!(
        ids(&apply_filters(&restaurants, "", &filters)),
        vec!["r5", "r3", "r1", "r2", "r4"]
    );
}

#[test]
fn test_price_and_dietary_facets_do_not_narrow() {
    let restaurants = sample_restaurants();
    let mut filters = FilterState::default();
    filters.toggle_price_range("₹₹₹");
    filters.toggle_dietary("Vegetarian");

    assert_eq!(apply_filters(&restaurants, "", &filters).len(), restaurants.len());
    assert_eq!(filters.active_filter_count(), 2);
}

#[test]
fn test_filters_combine() {
    let restaurants = sample_restaurants();
    let mut filters = FilterState::default();
    filters.toggle_cuisine("Indian");
    filters.set_min_rating(4.5);

    let result = apply_filters(&restaurants, "route", &filters);
    assert_eq!(ids(&result), vec!["r1"]);
}
