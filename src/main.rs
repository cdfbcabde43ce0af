use std::path::{Path, PathBuf};
use std::thread;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use storefront_rs::catalog::{apply_filters, load_catalog, Catalog, FilterState, SortKey};
use storefront_rs::checkout::{
    filter_orders, order_history, place_order, CheckoutRequest, OrderTracker, SystemClock,
};
use storefront_rs::cli::{Cli, Command};
use storefront_rs::error::Result;
use storefront_rs::interface::{
    display_cart, display_history, display_menu, display_order, display_profile,
    display_restaurants, display_top_rated, display_tracking, export_cart_csv,
    prompt_delivery_details, prompt_item_options, prompt_password, prompt_profile,
    prompt_registration, prompt_tip, prompt_yes_no,
};
use storefront_rs::models::{DeliveryDetails, HistoryStatus, PaymentMethod, Restaurant, UserUpdate};
use storefront_rs::pricing::{
    format_price, unit_price_with_options, PricingConfig, Tip, MAX_LINE_QUANTITY,
};
use storefront_rs::state::{
    AddOutcome, CartStore, FileStorage, LineRequest, SessionCache, UserSession,
};

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so output stays readable; `RUST_LOG` overrides the default.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("storefront_rs=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();
    let storage = FileStorage::new(&cli.session);

    match command {
        Command::Restaurants {
            search,
            cuisine,
            min_rating,
            sort,
        } => cmd_restaurants(&cli.catalog, search.as_deref(), &cuisine, min_rating, sort),
        Command::Top { count } => cmd_top(&cli.catalog, count),
        Command::Menu { restaurant } => cmd_menu(&cli.catalog, &restaurant),
        Command::Add {
            restaurant,
            item,
            quantity,
            note,
        } => cmd_add(&cli.catalog, storage, &restaurant, &item, quantity, note),
        Command::Cart => cmd_cart(storage),
        Command::Update { line, quantity } => cmd_update(storage, &line, quantity),
        Command::Remove { line } => cmd_remove(storage, &line),
        Command::Clear => cmd_clear(storage),
        Command::Login { email } => cmd_login(&cli.catalog, storage, &email),
        Command::Register => cmd_register(&cli.catalog, storage),
        Command::Logout => cmd_logout(storage),
        Command::Whoami => cmd_whoami(storage),
        Command::Profile {
            name,
            email,
            phone,
            address,
            show,
        } => {
            let update = UserUpdate {
                name,
                email,
                phone,
                address,
            };
            cmd_profile(storage, update, show)
        }
        Command::Checkout {
            tip,
            tip_amount,
            payment,
        } => cmd_checkout(&cli.catalog, storage, tip, tip_amount, payment),
        Command::Track { watch } => cmd_track(storage, watch),
        Command::History { search, status } => {
            cmd_history(&cli.catalog, storage, search.as_deref(), status)
        }
        Command::Export { path } => cmd_export(storage, path),
    }
}

fn cart_store(storage: FileStorage) -> CartStore<FileStorage> {
    CartStore::restore(storage, PricingConfig::default())
}

/// Look up a restaurant, suggesting a close match on a miss.
fn resolve_restaurant<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Restaurant> {
    let found = catalog.require_restaurant(id);
    if found.is_err() {
        if let Some(suggestion) = catalog.suggest_restaurant(id) {
            eprintln!("Did you mean '{}' ({})?", suggestion.name, suggestion.id);
        }
    }
    found
}

/// List restaurants matching the search and filters.
fn cmd_restaurants(
    catalog_path: &Path,
    search: Option<&str>,
    cuisines: &[String],
    min_rating: f64,
    sort: SortKey,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let mut filters = FilterState::default();
    for cuisine in cuisines {
        filters.toggle_cuisine(cuisine);
    }
    filters.set_min_rating(min_rating);
    filters.set_sort(sort);

    let results = apply_filters(&catalog.restaurants, search.unwrap_or(""), &filters);
    display_restaurants(&results, &filters);

    if results.is_empty() && filters.cuisines.is_empty() {
        println!("Available cuisines: {}", catalog.cuisines().join(", "));
    }
    Ok(())
}

fn cmd_top(catalog_path: &Path, count: usize) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    display_top_rated(&catalog.top_rated(count));
    Ok(())
}

fn cmd_menu(catalog_path: &Path, restaurant_id: &str) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let restaurant = resolve_restaurant(&catalog, restaurant_id)?;
    display_menu(&catalog, restaurant);
    Ok(())
}

/// Add an item: pick options, confirm any restaurant switch, then add.
fn cmd_add(
    catalog_path: &Path,
    storage: FileStorage,
    restaurant_id: &str,
    item_id: &str,
    quantity: i64,
    note: Option<String>,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let restaurant = resolve_restaurant(&catalog, restaurant_id)?;
    let item = catalog.menu_item(&restaurant.id, item_id)?;

    if quantity <= 0 || quantity > i64::from(MAX_LINE_QUANTITY) {
        println!("Quantity must be between 1 and {}.", MAX_LINE_QUANTITY);
        return Ok(());
    }

    let selected = prompt_item_options(item)?;
    let price = unit_price_with_options(item, &selected) * quantity as f64;
    println!("{} x {} - {}", quantity, item.name, format_price(price));

    let mut store = cart_store(storage);
    if store.would_require_clear(&restaurant.id) {
        let confirmed = prompt_yes_no(
            "Adding items from a different restaurant will clear your current cart. Continue?",
            false,
        )?;
        if !confirmed {
            println!("Cart unchanged.");
            return Ok(());
        }
    }

    let outcome = store.add_line_confirmed(LineRequest {
        restaurant_id: &restaurant.id,
        restaurant_name: &restaurant.name,
        menu_item: item,
        quantity,
        selected_options: selected,
        note,
    });

    match outcome {
        AddOutcome::Added(id) => {
            println!("Added to cart (line {}).", id);
            display_cart(&store);
        }
        AddOutcome::Declined | AddOutcome::Ignored => println!("Cart unchanged."),
    }
    Ok(())
}

fn cmd_cart(storage: FileStorage) -> Result<()> {
    display_cart(&cart_store(storage));
    Ok(())
}

fn cmd_update(storage: FileStorage, line_id: &str, quantity: i64) -> Result<()> {
    let mut store = cart_store(storage);
    if store.cart().line(line_id).is_none() {
        println!("No cart line '{}'.", line_id);
        return Ok(());
    }
    if quantity > i64::from(MAX_LINE_QUANTITY) {
        println!("Quantity must be at most {}.", MAX_LINE_QUANTITY);
        return Ok(());
    }

    store.update_quantity(line_id, quantity);
    display_cart(&store);
    Ok(())
}

fn cmd_remove(storage: FileStorage, line_id: &str) -> Result<()> {
    let mut store = cart_store(storage);
    store.remove_line(line_id);
    display_cart(&store);
    Ok(())
}

fn cmd_clear(storage: FileStorage) -> Result<()> {
    let mut store = cart_store(storage);
    store.clear_cart();
    println!("Cart cleared.");
    Ok(())
}

fn cmd_login(catalog_path: &Path, storage: FileStorage, email: &str) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let password = prompt_password()?;
    let mut session = UserSession::init(storage, catalog.users);

    if session.login(email, &password) {
        if let Some(user) = session.user() {
            println!("Welcome back, {}!", user.name);
        }
    } else {
        println!("Invalid email or password.");
    }
    Ok(())
}

fn cmd_register(catalog_path: &Path, storage: FileStorage) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let (name, email, password) = prompt_registration()?;
    let mut session = UserSession::init(storage, catalog.users);

    if session.register(&name, &email, &password) {
        println!("Account created. Welcome, {}!", name);
    } else {
        println!("An account with that email already exists.");
    }
    Ok(())
}

fn cmd_logout(storage: FileStorage) -> Result<()> {
    let mut session = UserSession::restore(storage, Vec::new());
    session.logout();
    println!("Logged out.");
    Ok(())
}

fn cmd_whoami(storage: FileStorage) -> Result<()> {
    let session = UserSession::restore(storage, Vec::new());
    match session.user() {
        Some(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
        None => println!("Not logged in."),
    }
    Ok(())
}

/// Show the profile, or apply edits from flags or prompts.
fn cmd_profile(storage: FileStorage, update: UserUpdate, show: bool) -> Result<()> {
    let mut session = UserSession::restore(storage, Vec::new());
    let Some(user) = session.user() else {
        println!("Please log in first: storefront login <email>");
        return Ok(());
    };

    if show {
        display_profile(user);
        return Ok(());
    }

    let no_flags = update.name.is_none()
        && update.email.is_none()
        && update.phone.is_none()
        && update.address.is_none();
    let update = if no_flags { prompt_profile(user)? } else { update };

    if session.update_profile(update) {
        if let Some(user) = session.user() {
            println!("Profile updated.");
            display_profile(user);
        }
    }
    Ok(())
}

/// Place the order for the current cart.
fn cmd_checkout(
    catalog_path: &Path,
    storage: FileStorage,
    tip_percent: Option<f64>,
    tip_amount: Option<String>,
    payment_method: PaymentMethod,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let session = UserSession::restore(storage.clone(), catalog.users);
    let mut store = cart_store(storage);

    let Some(user) = session.user() else {
        println!("Please log in first: storefront login <email>");
        return Ok(());
    };
    if store.cart().is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    display_cart(&store);

    let tip = match (tip_percent, tip_amount) {
        (Some(percent), _) => Tip::Percent(percent),
        (None, Some(amount)) => Tip::custom(&amount),
        (None, None) => prompt_tip(store.get_subtotal())?,
    };
    let delivery = prompt_delivery_details(&DeliveryDetails::from_user(user))?;

    let total = store.get_total_with_tip(tip);
    let confirmed = prompt_yes_no(&format!("Place order for {}?", format_price(total)), true)?;
    if !confirmed {
        println!("Order not placed.");
        return Ok(());
    }

    let request = CheckoutRequest {
        delivery,
        payment_method,
        tip,
    };
    let order = place_order(&mut store, &session, request, &SystemClock)?;
    store.cache().persist_last_order(&order);

    display_order(&order);
    println!("Track it with: storefront track --watch");
    Ok(())
}

/// Show the most recent order's status, optionally following it to delivery.
fn cmd_track(storage: FileStorage, watch: bool) -> Result<()> {
    let cache = SessionCache::new(storage);
    let Some(order) = cache.last_order() else {
        println!("No recent orders.");
        return Ok(());
    };

    let tracker = OrderTracker::for_order(&order, SystemClock);
    display_tracking(&order, &tracker);

    if !watch {
        return Ok(());
    }

    while let Some(wait) = tracker.time_until_next() {
        let wait = wait.to_std().unwrap_or_default() + std::time::Duration::from_millis(50);
        thread::sleep(wait);
        println!();
        display_tracking(&order, &tracker);
    }
    Ok(())
}

/// List past orders, newest session order first.
fn cmd_history(
    catalog_path: &Path,
    storage: FileStorage,
    search: Option<&str>,
    status: Option<HistoryStatus>,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let cache = SessionCache::new(storage);
    let latest = cache.last_order();

    let latest_status = latest
        .as_ref()
        .map(|order| (order, OrderTracker::for_order(order, SystemClock).status()));
    let history = order_history(&catalog.orders, latest_status);

    display_history(&filter_orders(&history, search.unwrap_or(""), status));
    Ok(())
}

fn cmd_export(storage: FileStorage, path: PathBuf) -> Result<()> {
    let store = cart_store(storage);
    if store.cart().is_empty() {
        println!("Your cart is empty; nothing to export.");
        return Ok(());
    }

    export_cart_csv(store.cart(), &path)?;
    println!(
        "Exported {} line(s) to {}",
        store.cart().line_count(),
        path.display()
    );
    Ok(())
}
