//! User domain types.

use serde::{Deserialize, Serialize};

use moneta_shared::types::UserId;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, unique.
    pub email: String,
    /// Argon2id PHC hash; never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// Fields needed to store a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Argon2id PHC hash.
    pub password_hash: String,
}
