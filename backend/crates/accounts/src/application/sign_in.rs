//! Sign In Use Case
//!
//! Authenticates an account and creates a session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountsConfig;
use crate::application::token::sign_session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::{AccountStore, SessionStore};
use crate::error::{AccountError, AccountResult};

/// Sign in input
pub struct SignInInput {
    /// Username or email
    pub identifier: String,
    /// Password
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed session token for the cookie
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase<A, S>
where
    A: AccountStore,
    S: SessionStore,
{
    accounts: Arc<A>,
    sessions: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<A, S> SignInUseCase<A, S>
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

    /// Authenticate and open a session.
    ///
    /// Every failure along the way collapses into the same
    /// [`AccountError::InvalidCredentials`] so the response never reveals
    /// whether the identifier or the password was wrong.
    pub async fn execute(&self, input: SignInInput) -> AccountResult<SignInOutput> {
        let identifier = input.identifier.trim();

        let account = self
            .accounts
            .find_by_username_or_email(identifier)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|_| AccountError::InvalidCredentials)?;

        if !account
            .password_hash
            .verify(&password, self.config.pepper())
        {
            return Err(AccountError::InvalidCredentials);
        }

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AccountError::Internal(format!("Invalid session TTL: {e}")))?;

        let session = Session::new(account.id, ttl);
        self.sessions.create(&session).await?;

        let session_token = sign_session_token(&self.config.session_secret, session.session_id);

        tracing::info!(
            account_id = %account.id,
            session_id = %session.session_id,
            "Account signed in"
        );

        Ok(SignInOutput { session_token })
    }
}
