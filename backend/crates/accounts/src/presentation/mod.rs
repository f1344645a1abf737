//! Presentation Layer
//!
//! HTTP handlers, form DTOs, flash notices, router, and middleware.

pub mod flash;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AccountsAppState;
pub use middleware::{SessionGateState, require_session};
pub use router::{accounts_router, accounts_router_generic};
