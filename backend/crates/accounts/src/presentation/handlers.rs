//! HTTP Handlers
//!
//! The form flow: every POST outcome is a redirect plus a one-shot notice
//! cookie; expected failures never surface as error pages. GET routes
//! serve the embedded static pages (template rendering is an external
//! concern).

use axum::Extension;
use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use std::sync::Arc;

use platform::cookie::extract_cookie;

use crate::application::config::AccountsConfig;
use crate::application::{
    AccountIdentity, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{AccountStore, SessionStore};
use crate::error::AccountError;
use crate::presentation::flash::{NoticeLevel, notice_cookie};
use crate::presentation::forms::{SignInForm, SignUpForm};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountsAppState<A, S>
where
    A: AccountStore + Clone + Send + Sync + 'static,
    S: SessionStore + Clone + Send + Sync + 'static,
{
    pub accounts: Arc<A>,
    pub sessions: Arc<S>,
    pub config: Arc<AccountsConfig>,
}

// ============================================================================
// Pages
// ============================================================================

/// GET /
pub async fn home_page() -> Html<&'static str> {
    Html(include_str!("pages/home.html"))
}

/// GET /signup
pub async fn signup_page() -> Html<&'static str> {
    Html(include_str!("pages/signup.html"))
}

/// GET /login
pub async fn login_page() -> Html<&'static str> {
    Html(include_str!("pages/login.html"))
}

/// GET /dashboard
///
/// Reachable only through the session gate; the [`AccountIdentity`]
/// extension is the proof.
pub async fn dashboard_page(Extension(identity): Extension<AccountIdentity>) -> Html<&'static str> {
    tracing::debug!(account_id = %identity.account_id, "Dashboard served");
    Html(include_str!("pages/dashboard.html"))
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /signup
pub async fn sign_up<A, S>(
    State(state): State<AccountsAppState<A, S>>,
    Form(form): Form<SignUpForm>,
) -> Response
where
    A: AccountStore + Clone + Send + Sync + 'static,
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.accounts.clone(), state.config.clone());

    let input = SignUpInput {
        username: form.username,
        email: form.email,
        password: form.password,
        confirm: form.confirm,
    };

    match use_case.execute(input).await {
        Ok(_) => (
            AppendHeaders([(
                header::SET_COOKIE,
                notice_cookie(NoticeLevel::Success, "Account created! Please log in."),
            )]),
            Redirect::to("/login"),
        )
            .into_response(),
        Err(
            err @ (AccountError::PasswordMismatch
            | AccountError::DuplicateIdentifier
            | AccountError::InvalidInput(_)),
        ) => (
            AppendHeaders([(
                header::SET_COOKIE,
                notice_cookie(NoticeLevel::Warning, &err.to_string()),
            )]),
            Redirect::to("/signup"),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /login
pub async fn sign_in<A, S>(
    State(state): State<AccountsAppState<A, S>>,
    Form(form): Form<SignInForm>,
) -> Response
where
    A: AccountStore + Clone + Send + Sync + 'static,
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.accounts.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        identifier: form.username,
        password: form.password,
    };

    match use_case.execute(input).await {
        Ok(output) => {
            let cookie = state
                .config
                .session_cookie()
                .build_set_cookie(&output.session_token);

            (
                AppendHeaders([(header::SET_COOKIE, cookie)]),
                Redirect::to("/dashboard"),
            )
                .into_response()
        }
        Err(err @ AccountError::InvalidCredentials) => (
            AppendHeaders([(
                header::SET_COOKIE,
                notice_cookie(NoticeLevel::Danger, &err.to_string()),
            )]),
            Redirect::to("/login"),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

// ============================================================================
// Sign Out
// ============================================================================

/// GET /logout (behind the session gate)
pub async fn sign_out<A, S>(
    State(state): State<AccountsAppState<A, S>>,
    headers: HeaderMap,
) -> Response
where
    A: AccountStore + Clone + Send + Sync + 'static,
    S: SessionStore + Clone + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = SignOutUseCase::new(state.sessions.clone(), state.config.clone());
        // Ignore errors - the cookie is cleared regardless
        let _ = use_case.execute(&token).await;
    }

    let clear_cookie = state.config.session_cookie().build_delete_cookie();

    (
        AppendHeaders([
            (header::SET_COOKIE, clear_cookie),
            (
                header::SET_COOKIE,
                notice_cookie(NoticeLevel::Info, "You have been logged out."),
            ),
        ]),
        Redirect::to("/"),
    )
        .into_response()
}
