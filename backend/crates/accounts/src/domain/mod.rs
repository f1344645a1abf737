//! Domain Layer
//!
//! Contains entities, value objects, and store traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{account::Account, account::NewAccount, session::Session};
pub use repository::{AccountStore, SessionStore};
