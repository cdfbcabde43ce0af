use chrono::Utc;
use tracing::{debug, info};

use crate::models::{User, UserUpdate};
use crate::state::persistence::{KeyValueStore, SessionCache};

/// Mock authentication over a fixed user directory.
///
/// Passwords are accepted but never checked. Failures are reported as `false`.
pub struct UserSession<S: KeyValueStore> {
    user: Option<User>,
    directory: Vec<User>,
    cache: SessionCache<S>,
}

impl<S: KeyValueStore> UserSession<S> {
    /// Logged-out session over `directory`.
    pub fn init(storage: S, directory: Vec<User>) -> Self {
        Self {
            user: None,
            directory,
            cache: SessionCache::new(storage),
        }
    }

    /// Session with any previously saved user logged back in.
    pub fn restore(storage: S, directory: Vec<User>) -> Self {
        let mut session = Self::init(storage, directory);
        session.auto_login();
        session
    }

    pub fn teardown(self) -> S {
        self.cache.into_storage()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, email: &str, _password: &str) -> bool {
        let Some(found) = self.directory.iter().find(|u| u.email == email).cloned() else {
            debug!(email, "login failed: unknown email");
            return false;
        };

        info!(user = %found.id, "logged in");
        self.cache.persist_user(&found);
        self.user = Some(found);
        true
    }

    pub fn register(&mut self, name: &str, email: &str, _password: &str) -> bool {
        if self.directory.iter().any(|u| u.email == email) {
            debug!(email, "registration failed: email already registered");
            return false;
        }

        let user = User {
            id: format!("user-{}", Utc::now().timestamp_millis()),
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
        };

        info!(user = %user.id, "registered");
        self.cache.persist_user(&user);
        self.user = Some(user);
        true
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user = %user.id, "logged out");
        }
        self.cache.evict_user();
    }

    /// Pick up a user saved by an earlier session. Corrupt entries are dropped.
    pub fn auto_login(&mut self) {
        if let Some(user) = self.cache.restore_user() {
            debug!(user = %user.id, "restored user");
            self.user = Some(user);
        }
    }

    pub fn update_profile(&mut self, update: UserUpdate) -> bool {
        let Some(user) = self.user.as_mut() else {
            return false;
        };

        user.apply(update);
        self.cache.persist_user(user);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::persistence::{MemoryStorage, USER_KEY};

    fn directory() -> Vec<User> {
        vec![User {
            id: "user1".to_string(),
            name: "Rahul Sharma".to_string(),
            email: "rahul@example.com".to_string(),
            phone: Some("9876543210".to_string()),
            address: Some("12 MG Road, Bengaluru".to_string()),
        }]
    }

    #[test]
    fn test_login_known_email() {
        let storage = MemoryStorage::new();
        let mut session = UserSession::init(storage.clone(), directory());

        assert!(session.login("rahul@example.com", "anything"));
        assert!(session.is_authenticated());
        assert!(storage.get(USER_KEY).is_some());
    }

    #[test]
    fn test_login_unknown_email() {
        let mut session = UserSession::init(MemoryStorage::new(), directory());
        assert!(!session.login("nobody@example.com", "pw"));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_register_rejects_existing_email() {
        let mut session = UserSession::init(MemoryStorage::new(), directory());
        assert!(!session.register("Dup", "rahul@example.com", "pw"));
        assert!(session.register("Meera", "meera@example.com", "pw"));
        let user = session.user().unwrap();
        assert!(user.id.starts_with("user-"));
        assert_eq!(user.name, "Meera");
    }

    #[test]
    fn test_logout_evicts_user() {
        let storage = MemoryStorage::new();
        let mut session = UserSession::init(storage.clone(), directory());
        session.login("rahul@example.com", "pw");

        session.logout();
        assert!(!session.is_authenticated());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[test]
    fn test_restore_logs_user_back_in() {
        let mut session = UserSession::init(MemoryStorage::new(), directory());
        session.login("rahul@example.com", "pw");
        let storage = session.teardown();

        let restored = UserSession::restore(storage, directory());
        assert_eq!(restored.user().unwrap().id, "user1");
    }

    #[test]
    fn test_update_profile_requires_login() {
        let storage = MemoryStorage::new();
        let mut session = UserSession::init(storage.clone(), directory());
        let update = UserUpdate {
            address: Some("7 Park Street, Kolkata".to_string()),
            ..Default::default()
        };
        assert!(!session.update_profile(update.clone()));

        session.login("rahul@example.com", "pw");
        assert!(session.update_profile(update));

        let restored = UserSession::restore(storage, directory());
        assert_eq!(
            restored.user().unwrap().address.as_deref(),
            Some("7 Park Street, Kolkata")
        );
    }

    #[test]
    fn test_partial_profile_update_on_restored_session() {
        let storage = MemoryStorage::new();
        let mut session = UserSession::init(storage.clone(), directory());
        session.login("rahul@example.com", "pw");

        let mut restored = UserSession::restore(storage.clone(), Vec::new());
        assert!(restored.update_profile(UserUpdate {
            name: Some("Rahul S.".to_string()),
            phone: Some("9000000001".to_string()),
            ..Default::default()
        }));

        let reloaded = UserSession::restore(storage, Vec::new());
        let user = reloaded.user().unwrap();
        assert_eq!(user.name, "Rahul S.");
        assert_eq!(user.phone.as_deref(), Some("9000000001"));
        assert_eq!(user.email, "rahul@example.com");
        assert_eq!(user.address.as_deref(), Some("12 MG Road, Bengaluru"));
    }
}
