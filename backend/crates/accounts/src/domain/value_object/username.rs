//! Username Value Object
//!
//! The username is the public handle an account logs in and is displayed
//! with. It is stored and compared **case-sensitively** ("alice" and
//! "Alice" are different accounts); only the email side of the identifier
//! pair is case-normalized. That asymmetry is intentional.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum username length (in characters)
pub const USERNAME_MAX_LENGTH: usize = 80;

/// Username value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new username with validation.
    ///
    /// Leading/trailing whitespace is trimmed; case is preserved.
    pub fn new(username: impl Into<String>) -> AppResult<Self> {
        let username = username.into().trim().to_string();

        if username.is_empty() {
            return Err(AppError::bad_request("Username cannot be empty"));
        }

        if username.chars().count() > USERNAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters",
                USERNAME_MAX_LENGTH
            )));
        }

        if username.chars().any(|c| c.is_control()) {
            return Err(AppError::bad_request(
                "Username contains invalid characters",
            ));
        }

        Ok(Self(username))
    }

    /// Create from a database value (assumed already validated)
    pub fn from_db(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
