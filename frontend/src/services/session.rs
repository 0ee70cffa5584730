use anyhow::{Context, Result};
use shared::User;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Key under which the signed-in user is stored
pub const USER_KEY: &str = "user";
/// Key under which the API token is stored
pub const JWT_KEY: &str = "jwt";

/// Key-value session storage, like the browser's `localStorage`
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Decode the signed-in user record, `None` when nobody is signed in
pub fn current_user(storage: &dyn SessionStorage) -> Result<Option<User>> {
    storage
        .get_item(USER_KEY)
        .map(|raw| serde_json::from_str::<User>(&raw).context("Invalid user record in session"))
        .transpose()
}

/// Store the signed-in user record
pub fn store_user(storage: &dyn SessionStorage, user: &User) -> Result<()> {
    let raw = serde_json::to_string(user).context("Failed to encode user record")?;
    storage.set_item(USER_KEY, &raw);
    Ok(())
}

/// In-process session storage
#[derive(Debug, Default)]
pub struct MemorySession {
    items: Mutex<HashMap<String, String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with an employee signed in
    pub fn with_employee(email: &str) -> Self {
        let session = Self::new();
        let user = User {
            user_type: "Employee".to_string(),
            email: Some(email.to_string()),
        };
        // Encoding a two-string record cannot fail
        if let Ok(raw) = serde_json::to_string(&user) {
            session.set_item(USER_KEY, &raw);
        }
        session
    }

    pub fn clear(&self) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl SessionStorage for MemorySession {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_round_trip() {
        let session = MemorySession::new();
        assert_eq!(current_user(&session).unwrap(), None);

        let user = User {
            user_type: "Employee".to_string(),
            email: Some("a@a".to_string()),
        };
        store_user(&session, &user).unwrap();

        assert_eq!(current_user(&session).unwrap(), Some(user));
        assert_eq!(
            session.get_item(USER_KEY).as_deref(),
            Some(r#"{"type":"Employee","email":"a@a"}"#)
        );
    }

    #[test]
    fn test_corrupt_user_record_is_an_error() {
        let session = MemorySession::new();
        session.set_item(USER_KEY, "{not json");
        assert!(current_user(&session).is_err());
    }

    #[test]
    fn test_with_employee_and_clear() {
        let session = MemorySession::with_employee("employee@test.tld");
        let user = current_user(&session).unwrap().unwrap();
        assert_eq!(user.email.as_deref(), Some("employee@test.tld"));

        session.set_item(JWT_KEY, "token");
        session.remove_item(JWT_KEY);
        assert_eq!(session.get_item(JWT_KEY), None);

        session.clear();
        assert_eq!(session.get_item(USER_KEY), None);
    }
}
