use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Preconditions for placing an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("you must be logged in to place an order")]
    NotAuthenticated,

    #[error("the cart is empty")]
    EmptyCart,
}

pub type Result<T> = std::result::Result<T, StoreError>;
