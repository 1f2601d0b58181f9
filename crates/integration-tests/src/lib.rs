//! Integration test harness for Shopkeep.
//!
//! Each [`TestApp`] owns a fresh `SQLite` file in the system temp directory,
//! with migrations applied and the full router (sessions, request ids,
//! tracing) built on top of it. Requests go straight into the router via
//! `tower::ServiceExt::oneshot`; no socket is opened.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopkeep-integration-tests
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use secrecy::SecretString;
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

use shopkeep_web::config::{AdminCredentials, AppConfig};
use shopkeep_web::middleware::{create_session_layer, create_session_store};
use shopkeep_web::state::AppState;
use shopkeep_web::{app, db};

/// Admin username configured for every test app.
pub const ADMIN_USER: &str = "admin";
/// Admin password configured for every test app.
pub const ADMIN_PASS: &str = "s3cret-pass";

const SESSION_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6e";

/// Upper bound on response bodies read by the harness.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A router wired to its own throwaway database.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    db_path: PathBuf,
}

impl TestApp {
    /// Build the application on a new, migrated database file.
    pub async fn spawn() -> Self {
        let db_path = std::env::temp_dir().join(format!("shopkeep-test-{}.db", Uuid::new_v4()));
        let database_url = format!("sqlite://{}", db_path.display());

        let pool = db::create_pool(&database_url)
            .await
            .expect("Failed to create test database");
        db::migrate(&pool)
            .await
            .expect("Failed to run migrations");
        let store = create_session_store(&pool)
            .await
            .expect("Failed to create session store");

        let config = test_config(database_url);
        let session_layer = create_session_layer(store, &config);
        let router = app(AppState::new(config, pool.clone()), session_layer);

        Self {
            router,
            pool,
            db_path,
        }
    }

    /// Send a GET request, optionally with a session cookie.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut request = Request::get(path);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).expect("Invalid request"))
            .await
    }

    /// Send a url-encoded form POST, optionally with a session cookie.
    pub async fn post_form(
        &self,
        path: &str,
        cookie: Option<&str>,
        fields: &[(&str, &str)],
    ) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();

        let mut request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::from(body)).expect("Invalid request"))
            .await
    }

    /// Log in with the configured credentials and return the session cookie.
    pub async fn login(&self) -> String {
        let response = self
            .post_form(
                "/login",
                None,
                &[("username", ADMIN_USER), ("password", ADMIN_PASS)],
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        response
            .session_cookie()
            .expect("Login did not set a session cookie")
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Number of rows in a table.
    pub async fn count(&self, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count rows");
        count
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut path = self.db_path.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

/// A fully buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The `name=value` part of the session cookie, if one was set.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("shopkeep_session="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

fn test_config(database_url: String) -> AppConfig {
    AppConfig {
        database_url,
        host: [127, 0, 0, 1].into(),
        port: 5000,
        base_url: "http://localhost:5000".to_string(),
        session_secret: SecretString::from(SESSION_SECRET),
        admin: AdminCredentials::new(ADMIN_USER, ADMIN_PASS),
        log_json: false,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}
