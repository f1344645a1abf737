//! Session Entity
//!
//! An authenticated session. Sessions are ephemeral: they live in the
//! session store only (never in the credential store), are created on
//! login, and are destroyed on logout or expiry.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::account_id::AccountId;

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4); the signed cookie token resolves to this
    pub session_id: Uuid,
    /// The authenticated account
    pub account_id: AccountId,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Expiry; expired sessions resolve to anonymous and are deleted lazily
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session. TTL comes from the application config, not
    /// from the entity.
    pub fn new(account_id: AccountId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            account_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
