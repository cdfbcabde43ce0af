use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use tracing::debug;

use crate::catalog::filters::SortKey;
use crate::error::{Result, StoreError};
use crate::models::{MenuItem, PastOrder, Restaurant, Review, User};

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Size of the top-rated list on the landing screen.
pub const TOP_RATED_COUNT: usize = 4;

/// The static, read-only storefront dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub restaurants: Vec<Restaurant>,
    /// Menu items keyed by restaurant id.
    #[serde(default)]
    pub menus: HashMap<String, Vec<MenuItem>>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Accounts accepted by the mock login.
    #[serde(default)]
    pub users: Vec<User>,
    /// Previously placed orders shown in the order history.
    #[serde(default)]
    pub orders: Vec<PastOrder>,
}

impl Catalog {
    pub fn restaurant(&self, id: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    /// Look up a restaurant, reporting a not-found error.
    pub fn require_restaurant(&self, id: &str) -> Result<&Restaurant> {
        self.restaurant(id)
            .ok_or_else(|| StoreError::RestaurantNotFound(id.to_string()))
    }

    /// Menu for a restaurant; empty when the id is unknown.
    pub fn menu(&self, restaurant_id: &str) -> &[MenuItem] {
        self.menus
            .get(restaurant_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn menu_item(&self, restaurant_id: &str, item_id: &str) -> Result<&MenuItem> {
        self.menu(restaurant_id)
            .iter()
            .find(|m| m.id == item_id)
            .ok_or_else(|| StoreError::MenuItemNotFound(item_id.to_string()))
    }

    /// Menu grouped by category, categories in order of first appearance.
    pub fn menu_by_category(&self, restaurant_id: &str) -> Vec<(&str, Vec<&MenuItem>)> {
        let mut groups: Vec<(&str, Vec<&MenuItem>)> = Vec::new();
        for item in self.menu(restaurant_id) {
            match groups.iter_mut().find(|(c, _)| *c == item.category) {
                Some((_, items)) => items.push(item),
                None => groups.push((item.category.as_str(), vec![item])),
            }
        }
        groups
    }

    pub fn reviews_for(&self, restaurant_id: &str) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| r.restaurant_id == restaurant_id)
            .collect()
    }

    /// Mean review rating; 0 when there are no reviews.
    pub fn average_rating(&self, restaurant_id: &str) -> f64 {
        let reviews = self.reviews_for(restaurant_id);
        if reviews.is_empty() {
            return 0.0;
        }
        reviews.iter().map(|r| r.rating).sum::<f64>() / reviews.len() as f64
    }

    /// Distinct cuisine tags, in order of first appearance.
    pub fn cuisines(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for cuisine in self.restaurants.iter().flat_map(|r| r.cuisine.iter()) {
            if !seen.contains(&cuisine.as_str()) {
                seen.push(cuisine.as_str());
            }
        }
        seen
    }

    /// The `count` highest-rated restaurants; ties keep catalog order.
    pub fn top_rated(&self, count: usize) -> Vec<&Restaurant> {
        let mut ranked: Vec<&Restaurant> = self.restaurants.iter().collect();
        ranked.sort_by(|a, b| SortKey::RatingHighToLow.compare(a, b));
        ranked.truncate(count);
        ranked
    }

    pub fn find_user(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// Closest restaurant by name or id, for typo suggestions.
    pub fn suggest_restaurant(&self, query: &str) -> Option<&Restaurant> {
        let query = query.to_lowercase();
        self.restaurants
            .iter()
            .map(|r| {
                let by_name = jaro_winkler(&r.name.to_lowercase(), &query);
                let by_id = jaro_winkler(&r.id.to_lowercase(), &query);
                (r, by_name.max(by_id))
            })
            .filter(|(_, score)| close_enough(*score))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(r, _)| r)
    }
}

fn close_enough(score: f64) -> bool {
    score >= SUGGESTION_THRESHOLD
}

/// Load the catalog from a JSON file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&content)?;
    debug!(
        restaurants = catalog.restaurants.len(),
        reviews = catalog.reviews.len(),
        "loaded catalog"
    );
    Ok(catalog)
}
