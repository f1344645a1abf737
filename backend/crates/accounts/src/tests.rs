//! Integration tests for the accounts crate
//!
//! Use-case tests run against the real SQLite store (in-memory database)
//! and the in-memory session store; HTTP tests drive the full router.

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use crate::application::config::AccountsConfig;
use crate::application::{
    ResolveSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::error::AccountError;
use crate::infra::memory::MemorySessionStore;
use crate::infra::sqlite::SqliteAccountStore;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

fn test_config() -> Arc<AccountsConfig> {
    Arc::new(AccountsConfig::development())
}

fn signup_input(username: &str, email: &str, password: &str, confirm: &str) -> SignUpInput {
    SignUpInput {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm: confirm.to_string(),
    }
}

async fn create_account(
    accounts: &Arc<SqliteAccountStore>,
    config: &Arc<AccountsConfig>,
    username: &str,
    email: &str,
    password: &str,
) {
    let use_case = SignUpUseCase::new(accounts.clone(), config.clone());
    use_case
        .execute(signup_input(username, email, password, password))
        .await
        .expect("signup should succeed");
}

mod signup_tests {
    use super::*;

    #[tokio::test]
    async fn test_signup_success_with_short_password() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let config = test_config();
        let use_case = SignUpUseCase::new(accounts.clone(), config.clone());

        // No minimum password length; "p1" is acceptable
        let output = use_case
            .execute(signup_input("alice", "a@x.com", "p1", "p1"))
            .await
            .expect("signup should succeed");

        assert!(output.account_id.as_i64() >= 1);
    }

    #[tokio::test]
    async fn test_signup_password_mismatch() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool.clone()));
        let config = test_config();
        let use_case = SignUpUseCase::new(accounts, config);

        let err = use_case
            .execute(signup_input("alice", "a@x.com", "p1", "p2"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::PasswordMismatch));

        // Mismatch is checked before anything touches the store
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_signup_duplicate_username() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let config = test_config();
        create_account(&accounts, &config, "alice", "a@x.com", "pw").await;

        let use_case = SignUpUseCase::new(accounts, config);
        let err = use_case
            .execute(signup_input("alice", "other@x.com", "pw", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::DuplicateIdentifier));
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_different_case() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let config = test_config();
        create_account(&accounts, &config, "alice", "a@x.com", "pw").await;

        // Emails are canonicalized to lowercase, so this collides
        let use_case = SignUpUseCase::new(accounts, config);
        let err = use_case
            .execute(signup_input("bob", "A@X.com", "pw", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::DuplicateIdentifier));
    }

    #[tokio::test]
    async fn test_signup_username_case_is_distinct() {
        // Usernames are case-sensitive: "Alice" and "alice" are two
        // different accounts
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let config = test_config();
        create_account(&accounts, &config, "alice", "a@x.com", "pw").await;

        let use_case = SignUpUseCase::new(accounts, config);
        let output = use_case
            .execute(signup_input("Alice", "alice2@x.com", "pw", "pw"))
            .await
            .expect("distinct casing should be a distinct account");
        assert!(output.account_id.as_i64() >= 2);
    }

    #[tokio::test]
    async fn test_signup_empty_username_rejected() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let config = test_config();
        let use_case = SignUpUseCase::new(accounts, config);

        let err = use_case
            .execute(signup_input("   ", "a@x.com", "pw", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_signup_invalid_email_rejected() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let config = test_config();
        let use_case = SignUpUseCase::new(accounts, config);

        let err = use_case
            .execute(signup_input("alice", "not-an-email", "pw", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_signup_never_stores_plaintext() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool.clone()));
        let config = test_config();
        create_account(&accounts, &config, "alice", "a@x.com", "hunter2").await;

        let stored: String =
            sqlx::query_scalar("SELECT password_hash FROM accounts WHERE username = 'alice'")
                .fetch_one(&pool)
                .await
                .unwrap();

        assert_ne!(stored, "hunter2");
        assert!(stored.starts_with("$argon2"));
    }
}

mod login_tests {
    use super::*;

    async fn login(
        accounts: &Arc<SqliteAccountStore>,
        sessions: &Arc<MemorySessionStore>,
        config: &Arc<AccountsConfig>,
        identifier: &str,
        password: &str,
    ) -> Result<String, AccountError> {
        let use_case = SignInUseCase::new(accounts.clone(), sessions.clone(), config.clone());
        use_case
            .execute(SignInInput {
                identifier: identifier.to_string(),
                password: password.to_string(),
            })
            .await
            .map(|out| out.session_token)
    }

    #[tokio::test]
    async fn test_login_by_username() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let sessions = Arc::new(MemorySessionStore::new());
        let config = test_config();
        create_account(&accounts, &config, "alice", "a@x.com", "pw").await;

        let token = login(&accounts, &sessions, &config, "alice", "pw")
            .await
            .expect("login by username");
        assert!(token.contains('.'));
        assert_eq!(sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_login_by_email_any_case() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let sessions = Arc::new(MemorySessionStore::new());
        let config = test_config();
        create_account(&accounts, &config, "alice", "a@x.com", "pw").await;

        login(&accounts, &sessions, &config, "a@x.com", "pw")
            .await
            .expect("login by email");
        login(&accounts, &sessions, &config, "A@X.COM", "pw")
            .await
            .expect("email comparison is case-insensitive");
    }

    #[tokio::test]
    async fn test_login_username_is_case_sensitive() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let sessions = Arc::new(MemorySessionStore::new());
        let config = test_config();
        create_account(&accounts, &config, "alice", "a@x.com", "pw").await;

        let err = login(&accounts, &sessions, &config, "ALICE", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let sessions = Arc::new(MemorySessionStore::new());
        let config = test_config();
        create_account(&accounts, &config, "alice", "a@x.com", "pw").await;

        let err = login(&accounts, &sessions, &config, "alice", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_identifier_same_error() {
        // Unknown identifier and wrong password are indistinguishable
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let sessions = Arc::new(MemorySessionStore::new());
        let config = test_config();

        let err = login(&accounts, &sessions, &config, "nobody", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid credentials.");
        assert_eq!(sessions.len().await, 0);
    }

    #[tokio::test]
    async fn test_login_token_resolves_to_identity() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let sessions = Arc::new(MemorySessionStore::new());
        let config = test_config();
        create_account(&accounts, &config, "alice", "a@x.com", "pw").await;

        let token = login(&accounts, &sessions, &config, "alice", "pw")
            .await
            .unwrap();

        let resolve = ResolveSessionUseCase::new(accounts, sessions, config);
        let identity = resolve
            .resolve(Some(&token))
            .await
            .expect("fresh token should resolve");
        assert_eq!(identity.username, "alice");
    }
}

mod session_tests {
    use super::*;

    async fn logged_in_fixture() -> (
        Arc<SqliteAccountStore>,
        Arc<MemorySessionStore>,
        Arc<AccountsConfig>,
        String,
    ) {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let sessions = Arc::new(MemorySessionStore::new());
        let config = test_config();
        create_account(&accounts, &config, "alice", "a@x.com", "pw").await;

        let use_case = SignInUseCase::new(accounts.clone(), sessions.clone(), config.clone());
        let token = use_case
            .execute(SignInInput {
                identifier: "alice".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap()
            .session_token;

        (accounts, sessions, config, token)
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let (accounts, sessions, config, token) = logged_in_fixture().await;

        let sign_out = SignOutUseCase::new(sessions.clone(), config.clone());
        sign_out.execute(&token).await.expect("logout");
        assert_eq!(sessions.len().await, 0);

        let resolve = ResolveSessionUseCase::new(accounts, sessions, config);
        assert!(resolve.resolve(Some(&token)).await.is_none());
    }

    #[tokio::test]
    async fn test_tampered_token_does_not_resolve() {
        let (accounts, sessions, config, token) = logged_in_fixture().await;

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        let resolve = ResolveSessionUseCase::new(accounts, sessions, config);
        assert!(resolve.resolve(Some(&tampered)).await.is_none());
        assert!(resolve.resolve(Some("garbage")).await.is_none());
        assert!(resolve.resolve(None).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_swept_on_resolve() {
        let pool = test_pool().await;
        let accounts = Arc::new(SqliteAccountStore::new(pool));
        let sessions = Arc::new(MemorySessionStore::new());
        let config = Arc::new(AccountsConfig {
            session_ttl: Duration::ZERO,
            ..AccountsConfig::development()
        });
        create_account(&accounts, &config, "alice", "a@x.com", "pw").await;

        let sign_in = SignInUseCase::new(accounts.clone(), sessions.clone(), config.clone());
        let token = sign_in
            .execute(SignInInput {
                identifier: "alice".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap()
            .session_token;
        assert_eq!(sessions.len().await, 1);

        let resolve = ResolveSessionUseCase::new(accounts, sessions.clone(), config);
        assert!(resolve.resolve(Some(&token)).await.is_none());

        // Lazy expiry removed the entry
        assert_eq!(sessions.len().await, 0);
    }
}

mod store_tests {
    use super::*;

    use platform::password::ClearTextPassword;

    use crate::domain::entity::account::NewAccount;
    use crate::domain::repository::AccountStore;
    use crate::domain::value_object::{email::Email, username::Username};

    fn new_account(username: &str, email: &str) -> NewAccount {
        let password_hash = ClearTextPassword::new("pw".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        NewAccount::new(
            Username::new(username).unwrap(),
            Email::new(email).unwrap(),
            password_hash,
        )
    }

    #[tokio::test]
    async fn test_insert_duplicate_username_maps_unique_violation() {
        // Bypasses the use case's pre-check: the UNIQUE constraint is
        // the authority when concurrent signups race past it
        let pool = test_pool().await;
        let store = SqliteAccountStore::new(pool);

        store
            .create(&new_account("alice", "a@x.com"))
            .await
            .expect("first insert");
        let err = store
            .create(&new_account("alice", "other@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::DuplicateIdentifier));
    }

    #[tokio::test]
    async fn test_insert_duplicate_email_maps_unique_violation() {
        let pool = test_pool().await;
        let store = SqliteAccountStore::new(pool);

        store
            .create(&new_account("alice", "a@x.com"))
            .await
            .expect("first insert");
        let err = store
            .create(&new_account("bob", "a@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::DuplicateIdentifier));
    }
}

mod http_tests {
    use super::*;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::presentation::router::accounts_router;

    async fn test_app() -> Router {
        let pool = test_pool().await;
        accounts_router(pool, MemorySessionStore::new(), AccountsConfig::development())
    }

    fn form_request(path: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(path: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    /// Pull `<name>=<value>` out of the response's Set-Cookie headers
    fn cookie_value(response: &axum::response::Response, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .and_then(|v| v.split(';').next())
            .map(|v| v[prefix.len()..].to_string())
    }

    #[tokio::test]
    async fn test_home_page_is_public() {
        let app = test_app().await;
        let response = app.oneshot(get_request("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_pages_embed_notice_renderer() {
        // Pages that are redirect targets must read and clear the
        // notice cookie client-side
        for path in ["/", "/signup", "/login"] {
            let app = test_app().await;
            let response = app.oneshot(get_request(path, None)).await.unwrap();
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let html = std::str::from_utf8(&body).unwrap();
            assert!(html.contains(r#"id="notice""#), "{path} lacks notice box");
            assert!(html.contains("notice="), "{path} lacks notice script");
        }
    }

    #[tokio::test]
    async fn test_dashboard_requires_session() {
        let app = test_app().await;
        let response = app.oneshot(get_request("/dashboard", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_signup_redirects_to_login_with_notice() {
        let app = test_app().await;
        let response = app
            .oneshot(form_request(
                "/signup",
                "username=alice&email=a%40x.com&password=p1&confirm=p1",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        let notice = cookie_value(&response, "notice").expect("notice cookie");
        assert!(notice.starts_with("success:"));
    }

    #[tokio::test]
    async fn test_signup_mismatch_redirects_back() {
        let app = test_app().await;
        let response = app
            .oneshot(form_request(
                "/signup",
                "username=alice&email=a%40x.com&password=p1&confirm=p2",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/signup");
        let notice = cookie_value(&response, "notice").expect("notice cookie");
        assert!(notice.starts_with("warning:"));
    }

    #[tokio::test]
    async fn test_failed_login_redirects_back_with_notice() {
        let app = test_app().await;
        let response = app
            .oneshot(form_request("/login", "username=ghost&password=pw"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        let notice = cookie_value(&response, "notice").expect("notice cookie");
        assert!(notice.starts_with("danger:"));
    }

    #[tokio::test]
    async fn test_full_flow_signup_login_dashboard_logout() {
        let pool = test_pool().await;
        let app = accounts_router(
            pool,
            MemorySessionStore::new(),
            AccountsConfig::development(),
        );

        // Sign up
        let response = app
            .clone()
            .oneshot(form_request(
                "/signup",
                "username=alice&email=a%40x.com&password=p1&confirm=p1",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        // Log in, by email this time
        let response = app
            .clone()
            .oneshot(form_request("/login", "username=a%40x.com&password=p1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");
        let token = cookie_value(&response, "session").expect("session cookie");
        assert!(!token.is_empty());

        // Dashboard is reachable with the session cookie
        let cookie = format!("session={token}");
        let response = app
            .clone()
            .oneshot(get_request("/dashboard", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Log out
        let response = app
            .clone()
            .oneshot(get_request("/logout", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        let cleared = cookie_value(&response, "session").expect("delete cookie");
        assert!(cleared.is_empty());

        // The old cookie no longer opens the dashboard
        let response = app
            .oneshot(get_request("/dashboard", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }
}
