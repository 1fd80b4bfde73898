//! Account types for PDFRooms.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular member: joins rooms by passkey, views and edits PDFs.
    #[default]
    User,
    /// Room administrator: creates rooms, uploads PDFs, sees activity.
    Admin,
}

impl Role {
    /// Get the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Whether this role has administrative rights.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: String,
    /// Email address (unique per role).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new account with a fresh ID.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            name: name.into(),
            role,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!(Role::from_str("user").unwrap(), Role::User);
        assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);
        assert!(Role::from_str("owner").is_err());
    }

    #[test]
    fn test_role_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_user_new() {
        let now = Utc::now();
        let user = User::new("Jane Smith", "jane@example.com", Role::User, now);
        assert_eq!(user.name, "Jane Smith");
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.created_at, now);
        assert!(!user.id.is_empty());
    }

    #[test]
    fn test_user_ids_are_unique() {
        let now = Utc::now();
        let a = User::new("A", "a@example.com", Role::User, now);
        let b = User::new("B", "b@example.com", Role::User, now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_user_serde_camel_case() {
        let now = Utc::now();
        let user = User::new("Jane", "jane@example.com", Role::Admin, now);
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"role\":\"admin\""));
    }
}
