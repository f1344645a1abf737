//! Store Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer.

use crate::domain::entity::{account::Account, account::NewAccount, session::Session};
use crate::domain::value_object::account_id::AccountId;
use crate::error::AccountResult;
use uuid::Uuid;

/// Credential store trait
///
/// One record per account. There are no update or delete operations;
/// accounts are immutable once created. Uniqueness of username and email
/// is the store's responsibility (UNIQUE constraints), so concurrent
/// signups cannot both pass an existence check and insert.
#[trait_variant::make(AccountStore: Send)]
pub trait LocalAccountStore {
    /// Create a new account; duplicate username or email fails with
    /// `AccountError::DuplicateIdentifier`.
    async fn create(&self, account: &NewAccount) -> AccountResult<Account>;

    /// Find an account whose username or email matches the identifier.
    /// The username arm compares case-sensitively; the email arm compares
    /// against the lowercased identifier.
    async fn find_by_username_or_email(&self, identifier: &str) -> AccountResult<Option<Account>>;

    /// Find an account by id
    async fn find_by_id(&self, id: AccountId) -> AccountResult<Option<Account>>;
}

/// Session store trait
///
/// Sessions are ephemeral and owned entirely by this store; the credential
/// store has no knowledge of them. Expired sessions are removed lazily
/// when a resolve encounters them.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Store a new session
    async fn create(&self, session: &Session) -> AccountResult<()>;

    /// Find a session by id
    async fn find_by_id(&self, session_id: Uuid) -> AccountResult<Option<Session>>;

    /// Delete a session; deleting an unknown id is not an error
    async fn delete(&self, session_id: Uuid) -> AccountResult<()>;
}
