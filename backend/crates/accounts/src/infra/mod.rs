//! Infrastructure Layer
//!
//! Store implementations: SQLite for credentials, in-memory for sessions.

pub mod memory;
pub mod sqlite;

pub use memory::MemorySessionStore;
pub use sqlite::SqliteAccountStore;
