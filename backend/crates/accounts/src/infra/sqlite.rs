//! SQLite Credential Store
//!
//! One table, `accounts`, in a local single-file database. The UNIQUE
//! constraints on `username` and `email` make the signup read-then-write
//! race safe: two concurrent signups with the same identifier cannot both
//! insert, whatever their pre-checks saw.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::SqlitePool;

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::AccountStore;
use crate::domain::value_object::{account_id::AccountId, email::Email, username::Username};
use crate::error::{AccountError, AccountResult};

/// SQLite-backed credential store
#[derive(Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AccountStore for SqliteAccountStore {
    async fn create(&self, account: &NewAccount) -> AccountResult<Account> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (
                username,
                email,
                password_hash,
                created_at
            ) VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(Account {
            id: AccountId::new(result.last_insert_rowid()),
            username: account.username.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            created_at: account.created_at,
        })
    }

    async fn find_by_username_or_email(&self, identifier: &str) -> AccountResult<Option<Account>> {
        // Username matches case-sensitively (SQLite TEXT default); email
        // is stored lowercased, so the identifier is lowercased for that
        // arm only
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                id,
                username,
                email,
                password_hash,
                created_at
            FROM accounts
            WHERE username = ?1 OR email = ?2
            "#,
        )
        .bind(identifier)
        .bind(identifier.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_id(&self, id: AccountId) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                id,
                username,
                email,
                password_hash,
                created_at
            FROM accounts
            WHERE id = ?1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }
}

/// A UNIQUE violation on insert is a duplicate signup, possibly one that
/// raced past the courtesy pre-check.
fn map_insert_error(err: sqlx::Error) -> AccountError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AccountError::DuplicateIdentifier
        }
        _ => AccountError::Database(err),
    }
}

// ============================================================================
// Row mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AccountResult<Account> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AccountError::Internal(format!("Stored hash is invalid: {e}")))?;

        Ok(Account {
            id: AccountId::new(self.id),
            username: Username::from_db(self.username),
            email: Email::from_db(self.email),
            password_hash,
            created_at: self.created_at,
        })
    }
}
