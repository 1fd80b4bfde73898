//! Account persistence for PDFRooms.

use std::sync::Arc;

use crate::storage::{self, Storage};
use crate::Result;

use super::types::{Role, User};

/// Storage key for the account collection.
const USERS_KEY: &str = "users";

/// Storage key for the logged-in account.
const CURRENT_USER_KEY: &str = "currentUser";

/// Repository for account operations.
#[derive(Clone)]
pub struct UserRepository {
    storage: Arc<dyn Storage>,
}

impl UserRepository {
    /// Create a new UserRepository over the given storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// List all registered accounts.
    pub fn list(&self) -> Result<Vec<User>> {
        storage::read_collection(self.storage.as_ref(), USERS_KEY)
    }

    /// Find an account by email and role.
    pub fn find_by_email_and_role(&self, email: &str, role: Role) -> Result<Option<User>> {
        let users = self.list()?;
        Ok(users
            .into_iter()
            .find(|u| u.email == email && u.role == role))
    }

    /// Persist an account, replacing any existing entry with the same ID.
    pub fn save(&self, user: &User) -> Result<()> {
        let mut users = self.list()?;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        storage::write_collection(self.storage.as_ref(), USERS_KEY, &users)
    }

    /// Get the logged-in account, if any.
    pub fn current(&self) -> Result<Option<User>> {
        storage::read_value(self.storage.as_ref(), CURRENT_USER_KEY)
    }

    /// Set the logged-in account.
    pub fn set_current(&self, user: &User) -> Result<()> {
        storage::write_value(self.storage.as_ref(), CURRENT_USER_KEY, user)
    }

    /// Clear the logged-in account.
    pub fn clear_current(&self) -> Result<()> {
        self.storage.remove(CURRENT_USER_KEY)
    }
}
