mod cart;
mod persistence;
mod session;
mod store;

pub use cart::{Cart, RestaurantRef};
pub use persistence::{
    FileStorage, KeyValueStore, MemoryStorage, SessionCache, CART_KEY, LAST_ORDER_KEY,
    RESTAURANT_ID_KEY, RESTAURANT_NAME_KEY, USER_KEY,
};
pub use session::UserSession;
pub use store::{AddOutcome, CartStore, LineRequest};
