//! Resolve Session Use Case
//!
//! Turns a cookie token into an [`AccountIdentity`], or anonymous.
//! Handlers that need an authenticated caller require the capability
//! explicitly instead of asking a global login manager.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::token::parse_session_token;
use crate::domain::repository::{AccountStore, SessionStore};
use crate::domain::value_object::account_id::AccountId;
use crate::error::AccountResult;

/// Proof of an authenticated request: the session resolved to a live
/// account. Inserted into request extensions by the session middleware.
#[derive(Debug, Clone)]
pub struct AccountIdentity {
    pub account_id: AccountId,
    pub username: String,
}

/// Resolve session use case
pub struct ResolveSessionUseCase<A, S>
where
    A: AccountStore,
    S: SessionStore,
{
    accounts: Arc<A>,
    sessions: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<A, S> ResolveSessionUseCase<A, S>
where
    A: AccountStore,
    S: SessionStore,
{
    pub fn new(accounts: Arc<A>, sessions: Arc<S>, config: Arc<AccountsConfig>) -> Self {
        Self {
            accounts,
            sessions,
            config,
        }
    }

    /// Resolve a token to an identity. A missing, malformed, expired, or
    /// signed-out token resolves to `None`; this never raises. Store
    /// faults are logged and also resolve to `None` — a guarded page
    /// degrades to a login redirect rather than an error page.
    pub async fn resolve(&self, session_token: Option<&str>) -> Option<AccountIdentity> {
        let token = session_token?;

        match self.execute(token).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::error!(error = %e, "Session resolution failed");
                None
            }
        }
    }

    /// Resolve with store errors surfaced (for tests and callers that
    /// want to distinguish faults from anonymous).
    pub async fn execute(&self, session_token: &str) -> AccountResult<Option<AccountIdentity>> {
        let Ok(session_id) = parse_session_token(&self.config.session_secret, session_token)
        else {
            return Ok(None);
        };

        let Some(session) = self.sessions.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            // Lazy expiry: there is no background sweeper
            self.sessions.delete(session_id).await?;
            return Ok(None);
        }

        let Some(account) = self.accounts.find_by_id(session.account_id).await? else {
            // Accounts are never deleted, so a dangling session points at
            // a store inconsistency worth flagging
            tracing::warn!(
                session_id = %session_id,
                account_id = %session.account_id,
                "Session references missing account"
            );
            self.sessions.delete(session_id).await?;
            return Ok(None);
        };

        Ok(Some(AccountIdentity {
            account_id: account.id,
            username: account.username.to_string(),
        }))
    }
}
