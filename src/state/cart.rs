use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CartLine, MenuItem, SelectedOption};
use crate::pricing::{self, PricingConfig, Tip, MAX_LINE_QUANTITY};

/// Identity of the restaurant every line in a non-empty cart belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRef {
    pub id: String,
    pub name: String,
}

/// The cart value and its pure state transitions.
///
/// Invariants: all lines come from `restaurant`, an empty cart has no
/// restaurant, and every line has quantity >= 1. Persistence is applied by
/// [`CartStore`](crate::state::CartStore) after each transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    restaurant: Option<RestaurantRef>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from restored parts.
    ///
    /// Lines with zero quantity are dropped and oversized quantities capped.
    /// Lines without a restaurant are dropped too, and an empty line list
    /// discards the restaurant.
    pub fn from_parts(lines: Vec<CartLine>, restaurant: Option<RestaurantRef>) -> Self {
        let Some(restaurant) = restaurant else {
            return Self::default();
        };

        let lines: Vec<CartLine> = lines
            .into_iter()
            .filter(|l| l.quantity > 0)
            .map(|mut l| {
                l.quantity = l.quantity.min(MAX_LINE_QUANTITY);
                l
            })
            .collect();
        let restaurant = if lines.is_empty() { None } else { Some(restaurant) };
        Self { lines, restaurant }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn restaurant(&self) -> Option<&RestaurantRef> {
        self.restaurant.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(u64::from(l.quantity)))
    }

    /// True when adding an item from `restaurant_id` would first wipe the cart.
    pub fn would_require_clear(&self, restaurant_id: &str) -> bool {
        match &self.restaurant {
            Some(current) => !self.lines.is_empty() && current.id != restaurant_id,
            None => false,
        }
    }

    /// Add a line after any restaurant switch has been confirmed.
    ///
    /// Clears the cart first if it holds another restaurant's items.
    /// Returns the new line id, or `None` when `quantity <= 0`.
    /// `stamp` seeds the line id (milliseconds since the epoch in practice).
    #[allow(clippy::too_many_arguments)]
    pub fn add_line_confirmed(
        &mut self,
        restaurant_id: &str,
        restaurant_name: &str,
        menu_item: &MenuItem,
        quantity: i64,
        selected_options: Vec<SelectedOption>,
        note: Option<String>,
        stamp: i64,
    ) -> Option<String> {
        if quantity <= 0 {
            return None;
        }

        if self.would_require_clear(restaurant_id) {
            debug!(
                from = self.restaurant.as_ref().map(|r| r.id.as_str()),
                to = restaurant_id,
                "switching restaurant, clearing cart"
            );
            self.clear();
        }

        self.restaurant = Some(RestaurantRef {
            id: restaurant_id.to_string(),
            name: restaurant_name.to_string(),
        });

        let id = self.next_line_id(&menu_item.id, stamp);
        let note = note.filter(|n| !n.trim().is_empty());
        self.lines.push(CartLine {
            id: id.clone(),
            menu_item: menu_item.clone(),
            quantity: clamp_quantity(quantity),
            selected_options,
            special_instructions: note,
        });

        Some(id)
    }

    /// Set a line's quantity; `quantity <= 0` removes the line.
    ///
    /// Returns whether anything changed. Unknown ids are ignored.
    pub fn update_quantity(&mut self, line_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_line(line_id);
        }

        match self.lines.iter_mut().find(|l| l.id == line_id) {
            Some(line) => {
                line.quantity = clamp_quantity(quantity);
                true
            }
            None => false,
        }
    }

    /// Remove a line by id. Unknown ids are ignored.
    pub fn remove_line(&mut self, line_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != line_id);
        let removed = self.lines.len() != before;

        if self.lines.is_empty() {
            self.restaurant = None;
        }
        removed
    }

    /// Empty the cart and forget the restaurant.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.restaurant = None;
    }

    pub fn subtotal(&self) -> f64 {
        pricing::cart_subtotal(&self.lines)
    }

    pub fn tax(&self, config: &PricingConfig) -> f64 {
        pricing::tax(self.subtotal(), config)
    }

    pub fn delivery_fee(&self, config: &PricingConfig) -> f64 {
        pricing::delivery_fee(&self.lines, config)
    }

    /// Subtotal + tax + delivery fee, without a tip.
    pub fn total(&self, config: &PricingConfig) -> f64 {
        pricing::order_total(&self.lines, None, config)
    }

    pub fn total_with_tip(&self, tip: Tip, config: &PricingConfig) -> f64 {
        pricing::order_total(&self.lines, Some(tip), config)
    }

    fn next_line_id(&self, menu_item_id: &str, stamp: i64) -> String {
        let base = format!("{}-{}", menu_item_id, stamp);
        if self.line(&base).is_none() {
            return base;
        }

        (1..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| self.line(candidate).is_none())
            .unwrap_or(base)
    }
}

/// Cap a positive quantity at [`MAX_LINE_QUANTITY`].
fn clamp_quantity(quantity: i64) -> u32 {
    let capped = u32::try_from(quantity)
        .unwrap_or(MAX_LINE_QUANTITY)
        .min(MAX_LINE_QUANTITY);
    if i64::from(capped) < quantity {
        debug!(requested = quantity, capped, "line quantity capped");
    }
    capped
}
