use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{CartLine, OrderConfirmation, User};
use crate::state::cart::{Cart, RestaurantRef};

pub const CART_KEY: &str = "cart";
pub const RESTAURANT_ID_KEY: &str = "restaurantId";
pub const RESTAURANT_NAME_KEY: &str = "restaurantName";
pub const USER_KEY: &str = "user";
pub const LAST_ORDER_KEY: &str = "lastOrder";

/// String key-value persistence surface.
///
/// Writes are fire-and-forget: backends log failures instead of returning them.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Storage backed by a single JSON object on disk.
///
/// Every operation re-reads the file, so several handles to the same path
/// stay consistent. A missing or unreadable file behaves as empty.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session file is corrupt, starting empty");
                BTreeMap::new()
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) {
        let result = serde_json::to_string_pretty(entries)
            .map_err(std::io::Error::from)
            .and_then(|json| fs::write(&self.path, json));

        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "failed to write session file");
        }
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.load();
        if entries.remove(key).is_some() {
            self.save(&entries);
        }
    }
}

/// Snapshot cache for the cart and the logged-in user.
///
/// Last write wins. Corrupt entries are removed and treated as absent.
#[derive(Debug, Clone)]
pub struct SessionCache<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> SessionCache<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Restore whatever was saved by a previous session.
    pub fn restore(&self) -> (Option<Cart>, Option<User>) {
        (self.restore_cart(), self.restore_user())
    }

    /// Saved cart, or `None` when nothing (valid) was saved.
    pub fn restore_cart(&self) -> Option<Cart> {
        let lines: Vec<CartLine> = self.read_json(CART_KEY)?;

        let restaurant = match (
            self.storage.get(RESTAURANT_ID_KEY),
            self.storage.get(RESTAURANT_NAME_KEY),
        ) {
            (Some(id), Some(name)) => Some(RestaurantRef { id, name }),
            (Some(id), None) => Some(RestaurantRef {
                name: id.clone(),
                id,
            }),
            _ => None,
        };

        let cart = Cart::from_parts(lines, restaurant);
        debug!(lines = cart.line_count(), "restored cart");
        Some(cart)
    }

    pub fn restore_user(&self) -> Option<User> {
        self.read_json(USER_KEY)
    }

    /// Overwrite the saved cart with the current state.
    pub fn persist_cart(&self, cart: &Cart) {
        self.write_json(CART_KEY, cart.lines());
        match cart.restaurant() {
            Some(restaurant) => {
                self.storage.set(RESTAURANT_ID_KEY, &restaurant.id);
                self.storage.set(RESTAURANT_NAME_KEY, &restaurant.name);
            }
            None => {
                self.storage.remove(RESTAURANT_ID_KEY);
                self.storage.remove(RESTAURANT_NAME_KEY);
            }
        }
    }

    pub fn evict_cart(&self) {
        self.storage.remove(CART_KEY);
        self.storage.remove(RESTAURANT_ID_KEY);
        self.storage.remove(RESTAURANT_NAME_KEY);
    }

    pub fn persist_user(&self, user: &User) {
        self.write_json(USER_KEY, user);
    }

    pub fn evict_user(&self) {
        self.storage.remove(USER_KEY);
    }

    pub fn persist_last_order(&self, order: &OrderConfirmation) {
        self.write_json(LAST_ORDER_KEY, order);
    }

    pub fn last_order(&self) -> Option<OrderConfirmation> {
        self.read_json(LAST_ORDER_KEY)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding corrupt session entry");
                self.storage.remove(key);
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.storage.set(key, &json),
            Err(e) => warn!(key, error = %e, "failed to serialize session entry"),
        }
    }
}
