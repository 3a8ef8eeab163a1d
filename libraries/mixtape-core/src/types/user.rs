/// User domain types
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account
///
/// The stored password hash is deliberately not part of this type; credential
/// lookups go through the storage layer so a `User` can be serialized into API
/// responses as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Avatar image URL
    pub image_url: Option<String>,

    /// Login name, unique when present
    pub username: Option<String>,

    /// Email address, unique when present
    pub email: Option<String>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub image_url: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    /// Bcrypt hash; the plaintext never reaches the storage layer
    pub password_hash: Option<String>,
}
