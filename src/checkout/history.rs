use crate::checkout::tracking::OrderStatus;
use crate::models::{HistoryStatus, OrderConfirmation, PastOrder};

impl From<OrderStatus> for HistoryStatus {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Confirmed => HistoryStatus::Confirmed,
            OrderStatus::Preparing => HistoryStatus::Preparing,
            OrderStatus::OutForDelivery => HistoryStatus::OutForDelivery,
            OrderStatus::Delivered => HistoryStatus::Delivered,
        }
    }
}

/// Filter the order history by search text and status.
///
/// The query matches order ids or restaurant names case-insensitively; an
/// empty query and a `None` status match everything. Order is preserved.
pub fn filter_orders<'a>(
    orders: &'a [PastOrder],
    query: &str,
    status: Option<HistoryStatus>,
) -> Vec<&'a PastOrder> {
    let query = query.to_lowercase();
    orders
        .iter()
        .filter(|o| {
            query.is_empty()
                || o.id.to_lowercase().contains(&query)
                || o.restaurant_name.to_lowercase().contains(&query)
        })
        .filter(|o| status.is_none_or(|s| o.status == s))
        .collect()
}

/// Full history: the order placed in this session first, then the catalog's.
///
/// A catalog entry with the same id as `latest` is replaced by it.
pub fn order_history(
    catalog_orders: &[PastOrder],
    latest: Option<(&OrderConfirmation, OrderStatus)>,
) -> Vec<PastOrder> {
    let mut history = Vec::with_capacity(catalog_orders.len() + 1);
    if let Some((order, status)) = latest {
        history.push(PastOrder::from_confirmation(order, status.into()));
    }

    let latest_id = latest.map(|(order, _)| order.id.as_str());
    history.extend(
        catalog_orders
            .iter()
            .filter(|o| Some(o.id.as_str()) != latest_id)
            .cloned(),
    );
    history
}
