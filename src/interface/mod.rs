pub mod export;
pub mod prompts;
pub mod render;

pub use export::{export_cart_csv, write_cart_csv};
pub use prompts::{
    prompt_delivery_details, prompt_item_options, prompt_password, prompt_profile,
    prompt_registration, prompt_tip, prompt_yes_no,
};
pub use render::{
    display_cart, display_history, display_menu, display_order, display_profile,
    display_restaurants, display_top_rated, display_tracking,
};
