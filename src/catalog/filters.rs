use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Restaurant;

/// Ordering applied to the restaurant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Descending `rating - distance / 10`.
    #[default]
    Recommended,
    RatingHighToLow,
    /// Ascending lower bound of the delivery-time range.
    DeliveryTime,
    DeliveryFeeLowToHigh,
    MinOrderLowToHigh,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Recommended,
        SortKey::RatingHighToLow,
        SortKey::DeliveryTime,
        SortKey::DeliveryFeeLowToHigh,
        SortKey::MinOrderLowToHigh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Recommended => "Recommended",
            SortKey::RatingHighToLow => "Rating: High to Low",
            SortKey::DeliveryTime => "Delivery Time",
            SortKey::DeliveryFeeLowToHigh => "Delivery Fee: Low to High",
            SortKey::MinOrderLowToHigh => "Min. Order: Low to High",
        }
    }

    /// Parse a display label. Unknown labels fall back to `Recommended`.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_default()
    }

    /// Ordering of two restaurants under this key.
    pub fn compare(&self, a: &Restaurant, b: &Restaurant) -> Ordering {
        match self {
            SortKey::Recommended => desc(a.recommended_score(), b.recommended_score()),
            SortKey::RatingHighToLow => desc(a.rating, b.rating),
            SortKey::DeliveryTime => {
                let a_time = a.delivery_time_lower_bound().unwrap_or(u32::MAX);
                let b_time = b.delivery_time_lower_bound().unwrap_or(u32::MAX);
                a_time.cmp(&b_time)
            }
            SortKey::DeliveryFeeLowToHigh => asc(a.delivery_fee, b.delivery_fee),
            SortKey::MinOrderLowToHigh => asc(a.min_order, b.min_order),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// Accepts the display labels plus short CLI names (`rating`, `time`, `fee`, `min-order`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_lowercase().as_str() {
            "recommended" => SortKey::Recommended,
            "rating" => SortKey::RatingHighToLow,
            "time" | "delivery-time" => SortKey::DeliveryTime,
            "fee" | "delivery-fee" => SortKey::DeliveryFeeLowToHigh,
            "min-order" => SortKey::MinOrderLowToHigh,
            _ => Self::ALL
                .into_iter()
                .find(|k| k.label().eq_ignore_ascii_case(s.trim()))
                .ok_or_else(|| format!("unknown sort order '{}'", s))?,
        };
        Ok(key)
    }
}

fn asc(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Facet selections for one browsing session. Never persisted.
///
/// Price-range and dietary facets are tracked for display; restaurants carry
/// no data for them, so they do not narrow the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub cuisines: Vec<String>,
    pub price_ranges: Vec<String>,
    pub dietary: Vec<String>,
    pub min_rating: f64,
    pub sort_by: SortKey,
}

impl FilterState {
    pub fn toggle_cuisine(&mut self, cuisine: &str) {
        toggle(&mut self.cuisines, cuisine);
    }

    pub fn toggle_price_range(&mut self, price: &str) {
        toggle(&mut self.price_ranges, price);
    }

    pub fn toggle_dietary(&mut self, option: &str) {
        toggle(&mut self.dietary, option);
    }

    pub fn set_min_rating(&mut self, rating: f64) {
        self.min_rating = rating.max(0.0);
    }

    pub fn set_sort(&mut self, sort_by: SortKey) {
        self.sort_by = sort_by;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of active facets, counting a rating threshold as one.
    pub fn active_filter_count(&self) -> usize {
        self.cuisines.len()
            + self.price_ranges.len()
            + self.dietary.len()
            + usize::from(self.min_rating > 0.0)
    }
}

fn toggle(values: &mut Vec<String>, value: &str) {
    if let Some(pos) = values.iter().position(|v| v == value) {
        values.remove(pos);
    } else {
        values.push(value.to_string());
    }
}

/// Narrow and order the restaurant list.
///
/// Text query matches name or cuisine case-insensitively and is used as
/// typed, whitespace included; only an empty query skips it. Cuisine facets
/// match exactly. Ties keep catalog order.
pub fn apply_filters<'a>(
    restaurants: &'a [Restaurant],
    query: &str,
    filters: &FilterState,
) -> Vec<&'a Restaurant> {
    let mut results: Vec<&Restaurant> = restaurants
        .iter()
        .filter(|r| query.is_empty() || r.matches_query(query))
        .filter(|r| {
            filters.cuisines.is_empty() || r.cuisine.iter().any(|c| filters.cuisines.contains(c))
        })
        .filter(|r| r.rating >= filters.min_rating)
        .collect();

    results.sort_by(|a, b| filters.sort_by.compare(a, b));
    results
}
