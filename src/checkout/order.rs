use chrono::Duration;
use rand::Rng;
use tracing::info;

use crate::checkout::tracking::Clock;
use crate::error::CheckoutError;
use crate::models::{DeliveryDetails, OrderConfirmation, PaymentMethod, User};
use crate::pricing::{ESTIMATED_DELIVERY_MINUTES, ORDER_ID_PREFIX, Tip};
use crate::state::{CartStore, KeyValueStore, UserSession};

/// Everything the checkout form collects besides the cart.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub tip: Tip,
}

impl DeliveryDetails {
    /// Prefill delivery details from the user's profile.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            address: user.address.clone().unwrap_or_default(),
            special_instructions: None,
        }
    }
}

/// Random order identifier such as `ORD-482913`.
pub fn generate_order_id() -> String {
    let n: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    format!("{}-{}", ORDER_ID_PREFIX, n)
}

/// Turn the current cart into a confirmation record and empty the cart.
///
/// Nothing is charged; the record is for display and tracking only.
pub fn place_order<S, U, C>(
    cart: &mut CartStore<S>,
    session: &UserSession<U>,
    request: CheckoutRequest,
    clock: &C,
) -> Result<OrderConfirmation, CheckoutError>
where
    S: KeyValueStore,
    U: KeyValueStore,
    C: Clock,
{
    let user = session.user().ok_or(CheckoutError::NotAuthenticated)?;
    let restaurant = cart
        .restaurant()
        .cloned()
        .ok_or(CheckoutError::EmptyCart)?;
    if cart.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let subtotal = cart.get_subtotal();
    let tip = request.tip.amount(subtotal);
    let created_at = clock.now();

    let order = OrderConfirmation {
        id: generate_order_id(),
        user_id: user.id.clone(),
        restaurant_id: restaurant.id,
        restaurant_name: restaurant.name,
        lines: cart.cart().lines().to_vec(),
        subtotal,
        tax: cart.get_tax(),
        delivery_fee: cart.get_delivery_fee(),
        tip,
        total: cart.get_total() + tip,
        delivery: request.delivery,
        payment_method: request.payment_method,
        created_at,
        estimated_delivery: created_at + Duration::minutes(ESTIMATED_DELIVERY_MINUTES),
    };

    info!(order = %order.id, total = order.total, "order placed");
    cart.clear_cart();
    Ok(order)
}
