pub mod cart;
pub mod catalog;
pub mod order;

pub use cart::{CartLine, SelectedOption};
pub use catalog::{Choice, MenuItem, MenuOption, Restaurant, Review, User, UserUpdate};
pub use order::{DeliveryDetails, HistoryStatus, OrderConfirmation, PastOrder, PaymentMethod};
