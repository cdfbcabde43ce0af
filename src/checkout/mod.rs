pub mod history;
pub mod order;
pub mod tracking;

pub use history::{filter_orders, order_history};
pub use order::{generate_order_id, place_order, CheckoutRequest};
pub use tracking::{Clock, ManualClock, OrderStatus, OrderTracker, SystemClock, STATUS_TIMELINE};
