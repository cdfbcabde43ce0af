use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CartLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Credit,
    Paypal,
    #[default]
    Cash,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Credit => "Credit card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::Cash => "Cash on delivery",
        };
        f.write_str(label)
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" | "card" => Ok(PaymentMethod::Credit),
            "paypal" => Ok(PaymentMethod::Paypal),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(format!("unknown payment method '{}'", other)),
        }
    }
}

/// Where and to whom the order is delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Display-only record of a placed order. Nothing is charged or stored remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub id: String,
    pub user_id: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub lines: Vec<CartLine>,
    pub subtotal: f64,
    pub tax: f64,
    pub delivery_fee: f64,
    pub tip: f64,
    pub total: f64,
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
}

/// Status of an order as shown in the order history.
///
/// Superset of the live tracking states: history also knows orders that are
/// still pending or were cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl HistoryStatus {
    pub const ALL: [HistoryStatus; 6] = [
        HistoryStatus::Pending,
        HistoryStatus::Confirmed,
        HistoryStatus::Preparing,
        HistoryStatus::OutForDelivery,
        HistoryStatus::Delivered,
        HistoryStatus::Cancelled,
    ];

    /// Wire name, e.g. `out-for-delivery`.
    pub fn key(&self) -> &'static str {
        match self {
            HistoryStatus::Pending => "pending",
            HistoryStatus::Confirmed => "confirmed",
            HistoryStatus::Preparing => "preparing",
            HistoryStatus::OutForDelivery => "out-for-delivery",
            HistoryStatus::Delivered => "delivered",
            HistoryStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HistoryStatus::Pending => "Pending",
            HistoryStatus::Confirmed => "Confirmed",
            HistoryStatus::Preparing => "Preparing",
            HistoryStatus::OutForDelivery => "Out for delivery",
            HistoryStatus::Delivered => "Delivered",
            HistoryStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HistoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.key() == wanted || status.label().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown order status '{}'", s.trim()))
    }
}

/// A past order as listed in the order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastOrder {
    pub id: String,
    pub user_id: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    #[serde(default)]
    pub items: Vec<CartLine>,
    pub status: HistoryStatus,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub tax: f64,
    pub tip: f64,
    pub total: f64,
    pub delivery_address: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery_time: DateTime<Utc>,
}

impl PastOrder {
    /// History entry for an order placed in this session.
    pub fn from_confirmation(order: &OrderConfirmation, status: HistoryStatus) -> Self {
        Self {
            id: order.id.clone(),
            user_id: order.user_id.clone(),
            restaurant_id: order.restaurant_id.clone(),
            restaurant_name: order.restaurant_name.clone(),
            items: order.lines.clone(),
            status,
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            tax: order.tax,
            tip: order.tip,
            total: order.total,
            delivery_address: order.delivery.address.clone(),
            payment_method: order.payment_method,
            created_at: order.created_at,
            estimated_delivery_time: order.estimated_delivery,
        }
    }

    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(u64::from(l.quantity)))
    }
}
