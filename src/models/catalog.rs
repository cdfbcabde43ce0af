use serde::{Deserialize, Serialize};

/// A restaurant listed in the catalog.
///
/// `delivery_time` is a display range such as `"25-35 min"`; `distance` is in km.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    pub cuisine: Vec<String>,
    pub rating: f64,
    pub delivery_time: String,
    pub delivery_fee: f64,
    pub min_order: f64,
    #[serde(default)]
    pub address: String,
    pub distance: f64,
}

impl Restaurant {
    /// Lower bound of the delivery-time range, in minutes.
    ///
    /// Returns `None` when the field does not start with a number.
    pub fn delivery_time_lower_bound(&self) -> Option<u32> {
        self.delivery_time
            .split('-')
            .next()
            .map(|s| {
                s.trim()
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect::<String>()
            })
            .and_then(|digits| digits.parse().ok())
    }

    /// Composite score used by the "Recommended" ordering.
    #[inline]
    pub fn recommended_score(&self) -> f64 {
        self.rating - self.distance / 10.0
    }

    /// Case-insensitive substring match on the name or any cuisine tag.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self
                .cuisine
                .iter()
                .any(|c| c.to_lowercase().contains(&query))
    }
}

/// One selectable value of a [`MenuOption`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub name: String,
    /// Price delta added to the item's unit price.
    pub price: f64,
}

/// A named customization axis on a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuOption {
    pub name: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub required: bool,
    /// Multi-select when true; otherwise at most one choice may be selected.
    #[serde(default)]
    pub multiple: bool,
}

impl MenuOption {
    pub fn choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}

/// An orderable dish. Immutable once loaded; cart lines keep their own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<MenuOption>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub gluten_free: bool,
}

impl MenuItem {
    pub fn option(&self, name: &str) -> Option<&MenuOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Dietary tags that apply to this item, for display.
    pub fn dietary_tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if self.vegetarian {
            tags.push("Vegetarian");
        }
        if self.vegan {
            tags.push("Vegan");
        }
        if self.gluten_free {
            tags.push("Gluten-Free");
        }
        tags
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub restaurant_id: String,
    pub rating: f64,
    pub comment: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl User {
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
    }
}
