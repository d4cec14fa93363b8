//! User accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = u64;

/// Stored account, including the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,

    /// Argon2id PHC string, salt included
    pub password_hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// View of the account that is safe to send to clients
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            age: self.age,
            created_at: self.created_at,
        }
    }
}

/// Account without credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Account about to be created. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub age: Option<u32>,
}

impl NewUser {
    /// Attach the identifier assigned by storage
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            full_name: self.full_name,
            email: normalize_email(&self.email),
            password_hash: self.password_hash,
            age: self.age,
            created_at: Utc::now(),
        }
    }
}

/// Emails are unique after trimming and lower-casing
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
