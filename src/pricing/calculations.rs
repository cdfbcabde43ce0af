use crate::models::{CartLine, MenuItem, SelectedOption};
use crate::pricing::constants::*;

/// Configurable rates for cart pricing.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub tax_rate: f64,
    pub delivery_fee: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: TAX_RATE,
            delivery_fee: FLAT_DELIVERY_FEE,
        }
    }
}

/// Tip chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tip {
    /// Percentage of the subtotal (15.0 = 15%).
    Percent(f64),
    /// Fixed amount.
    Flat(f64),
}

impl Default for Tip {
    fn default() -> Self {
        Tip::Percent(DEFAULT_TIP_PERCENT)
    }
}

impl Tip {
    /// Parse a custom tip amount; anything unparseable counts as no tip.
    pub fn custom(input: &str) -> Self {
        Tip::Flat(input.trim().parse().unwrap_or(0.0))
    }

    /// Tip amount for a given subtotal.
    pub fn amount(&self, subtotal: f64) -> f64 {
        match *self {
            Tip::Percent(percent) => subtotal * (percent / 100.0),
            Tip::Flat(amount) => amount,
        }
    }
}

/// Unit price plus the price deltas of every selected choice.
pub fn unit_price_with_options(item: &MenuItem, selected: &[SelectedOption]) -> f64 {
    item.price + selected.iter().map(|s| s.choice.price).sum::<f64>()
}

/// Total for one cart line: (unit price + option deltas) * quantity.
pub fn line_total(line: &CartLine) -> f64 {
    unit_price_with_options(&line.menu_item, &line.selected_options) * line.quantity as f64
}

/// Sum of line totals. Zero for an empty cart.
pub fn cart_subtotal(lines: &[CartLine]) -> f64 {
    lines.iter().map(line_total).sum()
}

pub fn tax(subtotal: f64, config: &PricingConfig) -> f64 {
    subtotal * config.tax_rate
}

/// Flat fee for any non-empty cart.
pub fn delivery_fee(lines: &[CartLine], config: &PricingConfig) -> f64 {
    if lines.is_empty() {
        0.0
    } else {
        config.delivery_fee
    }
}

/// Subtotal + tax + delivery fee + tip. Unrounded.
pub fn order_total(lines: &[CartLine], tip: Option<Tip>, config: &PricingConfig) -> f64 {
    let subtotal = cart_subtotal(lines);
    let tip_amount = tip.map(|t| t.amount(subtotal)).unwrap_or(0.0);

    subtotal + tax(subtotal, config) + delivery_fee(lines, config) + tip_amount
}
