//! Value Objects

pub mod account_id;
pub mod email;
pub mod username;

pub use account_id::AccountId;
pub use email::Email;
pub use username::Username;
