//! User entity as seen by the authentication core.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Status assigned to freshly registered accounts
pub const DEFAULT_USER_STATUS: &str = "new";

/// Role stored on the user record
///
/// Worker status is owned by the worker registry, so `is_worker` checks go
/// to the credential store rather than trusting this field alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A regular shop customer
    #[default]
    Customer,
    /// Warehouse staff accepting and fulfilling orders
    Worker,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Worker => "worker",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(UserRole::Customer),
            "worker" => Ok(UserRole::Worker),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, the `sub` claim of every token issued to the user
    pub id: Uuid,

    pub name: String,

    /// Login email, unique across users
    pub email: String,

    /// bcrypt hash of the password; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub phone: String,

    pub address: String,

    pub date_of_birth: NaiveDate,

    /// Account status, `new` on signup
    pub status: String,

    pub role: UserRole,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build the record persisted for a signup, with an already hashed password
    pub fn from_signup(new_user: NewUser, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash,
            phone: new_user.phone,
            address: new_user.address,
            date_of_birth: new_user.date_of_birth,
            status: DEFAULT_USER_STATUS.to_string(),
            role: UserRole::Customer,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Signup input, carrying the plain password until the session service hashes it
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> NewUser {
        NewUser {
            name: "Ivan".to_string(),
            email: "ivan@example.com".to_string(),
            password: "secret".to_string(),
            phone: "+70000000000".to_string(),
            address: "Moscow".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        }
    }

    #[test]
    fn test_from_signup_defaults() {
        let user = User::from_signup(signup(), "$2b$12$hash".to_string());

        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.status, DEFAULT_USER_STATUS);
        assert_eq!(user.password_hash, "$2b$12$hash");
        assert!(!user.is_admin());
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::from_signup(signup(), "$2b$12$hash".to_string());
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "customer");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("ADMIN".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!(UserRole::Worker.to_string(), "worker");
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
