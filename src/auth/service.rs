//! Registration and login for PDFRooms.
//!
//! There is no password handling: accounts are matched by email and role
//! only. This is demo-grade account switching, not an authentication
//! security model.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::PdfRoomsError;
use crate::storage::Storage;
use crate::Result;

use super::repository::UserRepository;
use super::types::{Role, User};

/// Account registration and session service.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
}

impl AuthService {
    /// Create a new AuthService over the given storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            users: UserRepository::new(storage),
        }
    }

    /// Access the underlying account repository.
    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    /// Register a new account and log it in.
    ///
    /// Fails with a validation error when the name or email is empty or
    /// when an account with the same email and role already exists.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<User> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() || email.is_empty() {
            return Err(PdfRoomsError::Validation(
                "name and email are required".to_string(),
            ));
        }

        if self.users.find_by_email_and_role(email, role)?.is_some() {
            return Err(PdfRoomsError::Validation(
                "an account with this email already exists".to_string(),
            ));
        }

        let user = User::new(name, email, role, now);
        self.users.save(&user)?;
        self.users.set_current(&user)?;

        info!("registered {} account for {}", role, email);
        Ok(user)
    }

    /// Log in to an existing account by email and role.
    pub fn login(&self, email: &str, role: Role) -> Result<User> {
        let email = email.trim();

        match self.users.find_by_email_and_role(email, role)? {
            Some(user) => {
                self.users.set_current(&user)?;
                info!("{} logged in as {}", email, role);
                Ok(user)
            }
            None => Err(PdfRoomsError::Auth(
                "no account for this email and role".to_string(),
            )),
        }
    }

    /// Log out the current account.
    pub fn logout(&self) -> Result<()> {
        self.users.clear_current()
    }

    /// Get the logged-in account, if any.
    pub fn current_user(&self) -> Result<Option<User>> {
        self.users.current()
    }
}
