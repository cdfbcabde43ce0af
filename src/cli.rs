use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::{SortKey, TOP_RATED_COUNT};
use crate::models::{HistoryStatus, PaymentMethod};

/// Storefront: browse restaurants, build a cart, check out, and track the order.
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the catalog JSON file (restaurants, menus, reviews, users).
    #[arg(short, long, global = true, env = "STOREFRONT_CATALOG", default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Path to the session file holding the cart and logged-in user.
    #[arg(short, long, global = true, env = "STOREFRONT_SESSION", default_value = "session.json")]
    pub session: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List restaurants, optionally searched, filtered, and sorted.
    Restaurants {
        /// Match restaurant names or cuisines containing this text.
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Only show restaurants serving this cuisine (repeatable).
        #[arg(long)]
        cuisine: Vec<String>,

        /// Minimum rating.
        #[arg(long, default_value_t = 0.0)]
        min_rating: f64,

        /// recommended, rating, time, fee, or min-order.
        #[arg(long, default_value = "recommended")]
        sort: SortKey,
    },

    /// Show the highest-rated restaurants.
    Top {
        #[arg(short = 'n', long, default_value_t = TOP_RATED_COUNT)]
        count: usize,
    },

    /// Show a restaurant's menu and reviews.
    Menu {
        restaurant: String,
    },

    /// Add a menu item to the cart.
    Add {
        restaurant: String,

        item: String,

        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,

        /// Special instructions for the kitchen.
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Show the cart and its totals.
    Cart,

    /// Change a line's quantity; zero or less removes it.
    Update {
        line: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line from the cart.
    Remove {
        line: String,
    },

    /// Empty the cart.
    Clear,

    /// Log in with an existing account.
    Login {
        email: String,
    },

    /// Create an account and log in.
    Register,

    /// Log out.
    Logout,

    /// Show the logged-in user.
    Whoami,

    /// Show or edit the logged-in user's profile.
    ///
    /// With no flags, prompts for each field.
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// Print the profile without editing it.
        #[arg(long, conflicts_with_all = ["name", "email", "phone", "address"])]
        show: bool,
    },

    /// Place the order for the current cart.
    Checkout {
        /// Tip as a percentage of the subtotal.
        #[arg(long, conflicts_with = "tip_amount")]
        tip: Option<f64>,

        /// Tip as a flat amount.
        #[arg(long)]
        tip_amount: Option<String>,

        /// credit, paypal, or cash.
        #[arg(long, default_value = "cash")]
        payment: PaymentMethod,
    },

    /// Show the status of the most recent order.
    Track {
        /// Keep printing updates until the order is delivered.
        #[arg(long)]
        watch: bool,
    },

    /// List past orders, including the most recent one.
    History {
        /// Match order ids or restaurant names containing this text.
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// pending, confirmed, preparing, out-for-delivery, delivered, or cancelled.
        #[arg(long)]
        status: Option<HistoryStatus>,
    },

    /// Write the cart to a CSV file.
    Export {
        path: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Restaurants {
            search: None,
            cuisine: Vec::new(),
            min_rating: 0.0,
            sort: SortKey::Recommended,
        }
    }
}
