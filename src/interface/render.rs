use crate::catalog::{Catalog, FilterState};
use crate::checkout::{Clock, OrderTracker};
use crate::models::{OrderConfirmation, PastOrder, Restaurant, User};
use crate::pricing::{format_price, line_total};
use crate::state::{CartStore, KeyValueStore};

/// Display the filtered restaurant list.
pub fn display_restaurants(restaurants: &[&Restaurant], filters: &FilterState) {
    println!();
    let noun = if restaurants.len() == 1 { "restaurant" } else { "restaurants" };
    println!(
        "=== {} {} found (sorted by {}) ===",
        restaurants.len(),
        noun,
        filters.sort_by
    );
    if filters.active_filter_count() > 0 {
        println!("{} filter(s) active", filters.active_filter_count());
    }
    println!();

    if restaurants.is_empty() {
        println!("No restaurants found. Try adjusting your search or filters.");
        println!();
        return;
    }

    let max_name_len = restaurants.iter().map(|r| r.name.len()).max().unwrap_or(10);

    for r in restaurants {
        println!(
            "  {:<name_width$}  ★ {:.1}  {:>10}  fee {:>5}  min {:>5}  [{}]  ({})",
            r.name,
            r.rating,
            r.delivery_time,
            format_price(r.delivery_fee),
            format_price(r.min_order),
            r.cuisine.join(", "),
            r.id,
            name_width = max_name_len
        );
    }
    println!();
}

/// Display the top-rated restaurants.
pub fn display_top_rated(restaurants: &[&Restaurant]) {
    println!();
    println!("=== Top rated ===");
    for (rank, r) in restaurants.iter().enumerate() {
        println!(
            "  {}. {}  ★ {:.1}  {}  ({})",
            rank + 1,
            r.name,
            r.rating,
            r.cuisine.join(", "),
            r.id
        );
    }
    println!();
}

/// Display a restaurant's menu grouped by category, plus its reviews.
pub fn display_menu(catalog: &Catalog, restaurant: &Restaurant) {
    println!();
    println!("=== {} ===", restaurant.name);
    println!(
        "{} | {} | {:.1} km | delivery {}",
        restaurant.cuisine.join(", "),
        restaurant.delivery_time,
        restaurant.distance,
        format_price(restaurant.delivery_fee)
    );

    for (category, items) in catalog.menu_by_category(&restaurant.id) {
        println!();
        println!("--- {} ---", category);
        for item in items {
            let mut tags: Vec<&str> = item.dietary_tags();
            if item.popular {
                tags.insert(0, "Popular");
            }
            let tags_str = if tags.is_empty() {
                String::new()
            } else {
                format!("  [{}]", tags.join(", "))
            };

            println!(
                "  {:<28} {:>7}  ({}){}",
                item.name,
                format_price(item.price),
                item.id,
                tags_str
            );
            if !item.description.is_empty() {
                println!("      {}", item.description);
            }
        }
    }

    let reviews = catalog.reviews_for(&restaurant.id);
    if !reviews.is_empty() {
        println!();
        println!(
            "--- Reviews ({}, average {:.1}) ---",
            reviews.len(),
            catalog.average_rating(&restaurant.id)
        );
        for review in reviews {
            println!("  {} ★ {:.0}  {}", review.user_name, review.rating, review.date);
            println!("      {}", review.comment);
        }
    }
    println!();
}

/// Display cart lines and the derived totals.
pub fn display_cart<S: KeyValueStore>(store: &CartStore<S>) {
    let cart = store.cart();
    println!();

    let Some(restaurant) = cart.restaurant() else {
        println!("Your cart is empty.");
        println!();
        return;
    };

    println!("=== Cart: {} ({} items) ===", restaurant.name, cart.item_count());
    println!();

    for line in cart.lines() {
        println!(
            "  {:>2} x {:<28} {:>8}   ({})",
            line.quantity,
            line.menu_item.name,
            format_price(line_total(line)),
            line.id
        );
        if !line.selected_options.is_empty() {
            println!("         {}", line.options_summary());
        }
        if let Some(note) = &line.special_instructions {
            println!("         Note: {}", note);
        }
    }

    println!();
    println!("  Subtotal      {:>10}", format_price(store.get_subtotal()));
    println!("  Delivery fee  {:>10}", format_price(store.get_delivery_fee()));
    println!("  Tax           {:>10}", format_price(store.get_tax()));
    println!("  Total         {:>10}", format_price(store.get_total()));
    println!();
}

/// Display an order confirmation receipt.
pub fn display_order(order: &OrderConfirmation) {
    println!();
    println!("=== Order {} confirmed ===", order.id);
    println!("From {}", order.restaurant_name);
    println!();

    for line in &order.lines {
        println!(
            "  {:>2} x {:<28} {:>8}",
            line.quantity,
            line.menu_item.name,
            format_price(line_total(line))
        );
    }

    println!();
    println!("  Subtotal      {:>10}", format_price(order.subtotal));
    println!("  Delivery fee  {:>10}", format_price(order.delivery_fee));
    println!("  Tax           {:>10}", format_price(order.tax));
    println!("  Tip           {:>10}", format_price(order.tip));
    println!("  Total         {:>10}", format_price(order.total));
    println!();
    println!("Deliver to: {}, {}", order.delivery.name, order.delivery.address);
    println!("Phone: {}", order.delivery.phone);
    println!("Payment: {}", order.payment_method);
    println!(
        "Estimated delivery: {}",
        order.estimated_delivery.format("%H:%M UTC")
    );
    println!();
}

/// Display the order history list.
pub fn display_history(orders: &[&PastOrder]) {
    println!();
    println!("=== Order history ({}) ===", orders.len());
    println!();

    if orders.is_empty() {
        println!("No orders found.");
        println!();
        return;
    }

    for order in orders {
        println!(
            "  {}  {}  {:<20} {:>3} items  {:>8}  {}",
            order.id,
            order.created_at.format("%Y-%m-%d"),
            order.restaurant_name,
            order.item_count(),
            format_price(order.total),
            order.status
        );
    }
    println!();
}

pub fn display_profile(user: &User) {
    println!("{} <{}> ({})", user.name, user.email, user.id);
    println!("  Phone:   {}", user.phone.as_deref().unwrap_or("-"));
    println!("  Address: {}", user.address.as_deref().unwrap_or("-"));
}

/// Display the status steps of a tracked order.
pub fn display_tracking<C: Clock>(order: &OrderConfirmation, tracker: &OrderTracker<C>) {
    println!("Order {}: {}", order.id, tracker.status());
    for (status, reached) in tracker.progress() {
        let mark = if reached { "[x]" } else { "[ ]" };
        println!("  {} {}", mark, status);
    }
}
