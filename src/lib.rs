pub mod catalog;
pub mod checkout;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod pricing;
pub mod state;

pub use error::{CheckoutError, Result, StoreError};
pub use models::{CartLine, MenuItem, Restaurant};
pub use state::{Cart, CartStore};
