//! Session Gate Middleware
//!
//! Guards protected routes. A request that does not resolve to a live
//! session is redirected to the login page; one that does gains an
//! [`AccountIdentity`] extension downstream handlers can extract.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use platform::cookie::extract_cookie;

use crate::application::config::AccountsConfig;
use crate::application::ResolveSessionUseCase;
use crate::domain::repository::{AccountStore, SessionStore};

/// State for the session gate
#[derive(Clone)]
pub struct SessionGateState<A, S>
where
    A: AccountStore + Clone + Send + Sync + 'static,
    S: SessionStore + Clone + Send + Sync + 'static,
{
    pub accounts: Arc<A>,
    pub sessions: Arc<S>,
    pub config: Arc<AccountsConfig>,
}

/// Middleware that requires a valid session cookie.
///
/// On success the [`AccountIdentity`] is inserted into request extensions.
/// On failure the browser is redirected to `/login` - never a bare 401,
/// this is a form flow.
pub async fn require_session<A, S>(
    State(state): State<SessionGateState<A, S>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response>
where
    A: AccountStore + Clone + Send + Sync + 'static,
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(request.headers(), &state.config.session_cookie_name);

    let use_case = ResolveSessionUseCase::new(
        state.accounts.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    match use_case.resolve(token.as_deref()).await {
        Some(identity) => {
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "Unauthenticated request, redirecting");
            Err(Redirect::to("/login").into_response())
        }
    }
}
