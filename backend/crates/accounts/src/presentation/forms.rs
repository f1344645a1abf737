//! Form DTOs
//!
//! Bodies are `application/x-www-form-urlencoded`; field names match the
//! HTML form inputs.

use serde::Deserialize;

/// Signup form (`POST /signup`)
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Login form (`POST /login`). The `username` field carries either the
/// username or the email address.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}
