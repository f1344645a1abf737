//! Account Entity
//!
//! A registered user identity. Accounts are created once via signup and
//! then never mutated or deleted; there is no profile-edit flow.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{account_id::AccountId, email::Email, username::Username};

/// Account entity, as persisted in the credential store
#[derive(Debug, Clone)]
pub struct Account {
    /// Store-assigned identifier, immutable
    pub id: AccountId,
    /// Unique handle, case-sensitive
    pub username: Username,
    /// Unique address, stored lowercased
    pub email: Email,
    /// Argon2id PHC string; never the plaintext password
    pub password_hash: HashedPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

/// Account data for insertion; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: Username,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    pub fn new(username: Username, email: Email, password_hash: HashedPassword) -> Self {
        Self {
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
