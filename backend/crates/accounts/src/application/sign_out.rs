//! Sign Out Use Case
//!
//! Invalidates a session. A token that fails verification is already
//! useless, so sign-out only acts on tokens that parse.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::token::parse_session_token;
use crate::domain::repository::SessionStore;
use crate::error::AccountResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionStore,
{
    sessions: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(sessions: Arc<S>, config: Arc<AccountsConfig>) -> Self {
        Self { sessions, config }
    }

    /// Delete the session behind the token. Subsequent resolves of the
    /// same token are anonymous.
    pub async fn execute(&self, session_token: &str) -> AccountResult<()> {
        let session_id = parse_session_token(&self.config.session_secret, session_token)?;
        self.sessions.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "Session signed out");
        Ok(())
    }
}
