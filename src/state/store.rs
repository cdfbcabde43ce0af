use chrono::Utc;
use tracing::{debug, info};

use crate::models::{MenuItem, SelectedOption};
use crate::pricing::{PricingConfig, Tip};
use crate::state::cart::{Cart, RestaurantRef};
use crate::state::persistence::{KeyValueStore, SessionCache};

/// Result of [`CartStore::add_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A line was appended; holds its id.
    Added(String),
    /// The restaurant switch was not confirmed; nothing changed.
    Declined,
    /// Quantity was zero or negative; nothing changed.
    Ignored,
}

/// A line to add, as assembled by the add-to-cart dialog.
#[derive(Debug, Clone)]
pub struct LineRequest<'a> {
    pub restaurant_id: &'a str,
    pub restaurant_name: &'a str,
    pub menu_item: &'a MenuItem,
    pub quantity: i64,
    pub selected_options: Vec<SelectedOption>,
    pub note: Option<String>,
}

/// Owns the cart for one session and persists it after every mutation.
pub struct CartStore<S: KeyValueStore> {
    cart: Cart,
    cache: SessionCache<S>,
    pricing: PricingConfig,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Start with an empty cart, ignoring anything saved.
    pub fn init(storage: S, pricing: PricingConfig) -> Self {
        Self {
            cart: Cart::new(),
            cache: SessionCache::new(storage),
            pricing,
        }
    }

    /// Start from the cart saved by a previous session, if any.
    pub fn restore(storage: S, pricing: PricingConfig) -> Self {
        let cache = SessionCache::new(storage);
        let cart = cache.restore_cart().unwrap_or_default();
        Self {
            cart,
            cache,
            pricing,
        }
    }

    /// Flush the current state and hand the storage back.
    pub fn teardown(self) -> S {
        self.cache.persist_cart(&self.cart);
        self.cache.into_storage()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cache(&self) -> &SessionCache<S> {
        &self.cache
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    pub fn restaurant(&self) -> Option<&RestaurantRef> {
        self.cart.restaurant()
    }

    pub fn would_require_clear(&self, restaurant_id: &str) -> bool {
        self.cart.would_require_clear(restaurant_id)
    }

    /// Add a line, asking `confirm` before wiping another restaurant's items.
    ///
    /// `confirm` is only called when a switch is needed.
    pub fn add_line<F>(&mut self, request: LineRequest<'_>, confirm: F) -> AddOutcome
    where
        F: FnOnce(&Cart) -> bool,
    {
        if request.quantity <= 0 {
            debug!(quantity = request.quantity, "ignoring add with non-positive quantity");
            return AddOutcome::Ignored;
        }

        if self.cart.would_require_clear(request.restaurant_id) && !confirm(&self.cart) {
            debug!(restaurant = request.restaurant_id, "restaurant switch declined");
            return AddOutcome::Declined;
        }

        self.add_line_confirmed(request)
    }

    /// Add a line; any restaurant switch is treated as already confirmed.
    pub fn add_line_confirmed(&mut self, request: LineRequest<'_>) -> AddOutcome {
        let switching = self.cart.would_require_clear(request.restaurant_id);
        let stamp = Utc::now().timestamp_millis();

        let Some(id) = self.cart.add_line_confirmed(
            request.restaurant_id,
            request.restaurant_name,
            request.menu_item,
            request.quantity,
            request.selected_options,
            request.note,
            stamp,
        ) else {
            return AddOutcome::Ignored;
        };

        if switching {
            info!(restaurant = request.restaurant_id, "cart switched to a new restaurant");
        }
        debug!(line = %id, item = %request.menu_item.id, "added cart line");
        self.cache.persist_cart(&self.cart);
        AddOutcome::Added(id)
    }

    pub fn update_quantity(&mut self, line_id: &str, quantity: i64) {
        if self.cart.update_quantity(line_id, quantity) {
            debug!(line = line_id, quantity, "updated cart line");
            self.cache.persist_cart(&self.cart);
        }
    }

    pub fn remove_line(&mut self, line_id: &str) {
        if self.cart.remove_line(line_id) {
            debug!(line = line_id, "removed cart line");
            self.cache.persist_cart(&self.cart);
        }
    }

    /// Empty the cart and evict it from the cache.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.cache.evict_cart();
        debug!("cleared cart");
    }

    pub fn get_subtotal(&self) -> f64 {
        self.cart.subtotal()
    }

    pub fn get_tax(&self) -> f64 {
        self.cart.tax(&self.pricing)
    }

    pub fn get_delivery_fee(&self) -> f64 {
        self.cart.delivery_fee(&self.pricing)
    }

    pub fn get_total(&self) -> f64 {
        self.cart.total(&self.pricing)
    }

    pub fn get_total_with_tip(&self, tip: Tip) -> f64 {
        self.cart.total_with_tip(tip, &self.pricing)
    }

    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }
}
