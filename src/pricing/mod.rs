pub mod calculations;
pub mod constants;

pub use calculations::{
    cart_subtotal, delivery_fee, line_total, order_total, tax, unit_price_with_options,
    PricingConfig, Tip,
};
pub use constants::*;
