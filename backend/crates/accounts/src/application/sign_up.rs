//! Sign Up Use Case
//!
//! Creates a new account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountsConfig;
use crate::domain::entity::account::NewAccount;
use crate::domain::repository::AccountStore;
use crate::domain::value_object::{account_id::AccountId, email::Email, username::Username};
use crate::error::{AccountError, AccountResult};

/// Sign up input
pub struct SignUpInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub account_id: AccountId,
}

/// Sign up use case
pub struct SignUpUseCase<A>
where
    A: AccountStore,
{
    accounts: Arc<A>,
    config: Arc<AccountsConfig>,
}

impl<A> SignUpUseCase<A>
where
    A: AccountStore,
{
    pub fn new(accounts: Arc<A>, config: Arc<AccountsConfig>) -> Self {
        Self { accounts, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AccountResult<SignUpOutput> {
        // Confirmation check comes first: nothing may touch the store
        // before it passes
        if input.password != input.confirm {
            return Err(AccountError::PasswordMismatch);
        }

        let username = Username::new(input.username)
            .map_err(|e| AccountError::InvalidInput(e.message().to_string()))?;
        let email = Email::new(input.email)
            .map_err(|e| AccountError::InvalidInput(e.message().to_string()))?;

        // Courtesy pre-check so the user gets a clean notice; the store's
        // UNIQUE constraints remain the authority under concurrency
        if self
            .accounts
            .find_by_username_or_email(username.as_str())
            .await?
            .is_some()
            || self
                .accounts
                .find_by_username_or_email(email.as_str())
                .await?
                .is_some()
        {
            return Err(AccountError::DuplicateIdentifier);
        }

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AccountError::InvalidInput(e.to_string()))?;
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        let account = self
            .accounts
            .create(&NewAccount::new(username, email, password_hash))
            .await?;

        tracing::info!(
            account_id = %account.id,
            username = %account.username,
            "Account created"
        );

        Ok(SignUpOutput {
            account_id: account.id,
        })
    }
}
