//! Accounts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store traits
//! - `application/` - Use cases and application services
//! - `infra/` - Store implementations (SQLite credentials, in-memory sessions)
//! - `presentation/` - HTTP handlers, forms, router, middleware
//!
//! ## Features
//! - Account signup with username + email + password
//! - Login by username or email, logout, protected dashboard
//! - Server-side sessions with HMAC-signed cookie tokens
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, fresh salt per hash
//! - Session tokens are `uuid.signature`, signed with HMAC-SHA256
//! - Login failures are indistinguishable: unknown identifier and wrong
//!   password produce the same generic rejection
//! - Username/email uniqueness is enforced by the store's UNIQUE
//!   constraints, not by handler-level checks

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use error::{AccountError, AccountResult};
pub use infra::memory::MemorySessionStore;
pub use infra::sqlite::SqliteAccountStore;
pub use presentation::router::accounts_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::forms::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
