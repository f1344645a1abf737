//! Accounts Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::get,
};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::repository::{AccountStore, SessionStore};
use crate::infra::memory::MemorySessionStore;
use crate::infra::sqlite::SqliteAccountStore;
use crate::presentation::handlers::{self, AccountsAppState};
use crate::presentation::middleware::{SessionGateState, require_session};

/// Create the accounts router over the SQLite store and in-memory sessions
pub fn accounts_router(
    pool: SqlitePool,
    sessions: MemorySessionStore,
    config: AccountsConfig,
) -> Router {
    accounts_router_generic(SqliteAccountStore::new(pool), sessions, config)
}

/// Create a generic accounts router for any store implementation
pub fn accounts_router_generic<A, S>(accounts: A, sessions: S, config: AccountsConfig) -> Router
where
    A: AccountStore + Clone + Send + Sync + 'static,
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let accounts = Arc::new(accounts);
    let sessions = Arc::new(sessions);
    let config = Arc::new(config);

    let state = AccountsAppState {
        accounts: accounts.clone(),
        sessions: sessions.clone(),
        config: config.clone(),
    };

    let gate = SessionGateState {
        accounts,
        sessions,
        config,
    };

    // Routes behind the session gate. Handlers here may rely on the
    // AccountIdentity extension being present.
    let protected = Router::new()
        .route("/dashboard", get(handlers::dashboard_page))
        .route("/logout", get(handlers::sign_out::<A, S>))
        .route_layer(from_fn_with_state(gate, require_session::<A, S>));

    Router::new()
        .route("/", get(handlers::home_page))
        .route("/signup", get(handlers::signup_page).post(handlers::sign_up::<A, S>))
        .route("/login", get(handlers::login_page).post(handlers::sign_in::<A, S>))
        .merge(protected)
        .with_state(state)
}
