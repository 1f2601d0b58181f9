//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPKEEP_SESSION_SECRET` - Session signing secret (min 32 chars, 12 distinct characters)
//! - `SHOPKEEP_ADMIN_USER` - Username of the shared admin account
//! - `SHOPKEEP_ADMIN_PASS` - Password of the shared admin account
//!
//! ## Optional
//! - `SHOPKEEP_DATABASE_URL` - `SQLite` URL (default: `sqlite://shops.db`,
//!   falls back to `DATABASE_URL`)
//! - `SHOPKEEP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPKEEP_PORT` - Listen port (default: 5000)
//! - `SHOPKEEP_BASE_URL` - Public URL (default: `http://localhost:5000`)
//! - `SHOPKEEP_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sentry sample rates

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use thiserror::Error;
use url::Url;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
/// Secrets with fewer distinct characters than this are rejected as repeats.
const MIN_DISTINCT_SECRET_CHARS: usize = 12;

const DEFAULT_DATABASE_URL: &str = "sqlite://shops.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    /// A variable is set but cannot be used.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    /// The session secret is too weak to sign cookies with.
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `SQLite` connection URL
    pub database_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, decides whether cookies are marked secure
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// The shared admin credential
    pub admin: AdminCredentials,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// The single admin username/password pair.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AdminCredentials {
    /// Create a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Check a submitted username and password.
    ///
    /// Both halves are compared in constant time and both are always compared,
    /// so the result does not reveal which one was wrong.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password
            .as_bytes()
            .ct_eq(self.password.expose_secret().as_bytes());
        bool::from(user_ok & pass_ok)
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the session secret is too short or too repetitive.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SHOPKEEP_DATABASE_URL");
        let host = get_env_or_default("SHOPKEEP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPKEEP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHOPKEEP_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPKEEP_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("SHOPKEEP_BASE_URL", "http://localhost:5000");
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPKEEP_BASE_URL".to_string(), e.to_string())
        })?;

        let session_secret = SecretString::from(get_required_env("SHOPKEEP_SESSION_SECRET")?);
        validate_session_secret(&session_secret, "SHOPKEEP_SESSION_SECRET")?;

        let admin = AdminCredentials {
            username: get_required_non_empty("SHOPKEEP_ADMIN_USER")?,
            password: SecretString::from(get_required_non_empty("SHOPKEEP_ADMIN_PASS")?),
        };

        let log_json = get_optional_env("SHOPKEEP_LOG_JSON").is_some();
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            admin,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (session cookie gets `Secure`).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Resolve only the database URL, for tools that never serve requests.
///
/// Loads `.env` like [`AppConfig::from_env`] but needs no secrets.
#[must_use]
pub fn database_url_from_env() -> String {
    let _ = dotenvy::dotenv();
    get_database_url("SHOPKEEP_DATABASE_URL")
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable that must not be blank.
fn get_required_non_empty(key: &str) -> Result<String, ConfigError> {
    let value = get_required_env(key)?;
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(value)
}

/// Get database URL with fallback to generic `DATABASE_URL`, then to the
/// bundled default file.
fn get_database_url(primary_key: &str) -> String {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reject session secrets that are short or built from a handful of
/// characters. The secret is hashed into the cookie-signing key, so it only
/// has to be long and varied.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {MIN_SESSION_SECRET_LENGTH} characters (got {})",
                value.len()
            ),
        ));
    }

    let distinct = value.chars().collect::<HashSet<_>>().len();
    if distinct < MIN_DISTINCT_SECRET_CHARS {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "uses only {distinct} distinct characters (need {MIN_DISTINCT_SECRET_CHARS}); generate it randomly"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".parse().unwrap(),
            port: 5000,
            base_url: base_url.to_string(),
            session_secret: SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"),
            admin: AdminCredentials::new("admin", "hunter2"),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[test]
    fn test_session_secret_too_short() {
        let secret = SecretString::from("short");
        let err = validate_session_secret(&secret, "SHOPKEEP_SESSION_SECRET").unwrap_err();
        assert!(err.to_string().contains("at least 32"));
    }

    #[test]
    fn test_session_secret_repetitive() {
        let secret = SecretString::from("abababababababababababababababab12");
        assert!(matches!(
            validate_session_secret(&secret, "SHOPKEEP_SESSION_SECRET"),
            Err(ConfigError::InsecureSecret(_, _))
        ));
    }

    #[test]
    fn test_session_secret_accepts_random_value() {
        let secret = SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6e");
        assert!(validate_session_secret(&secret, "SHOPKEEP_SESSION_SECRET").is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let addr = test_config("http://localhost:5000").socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn test_is_secure_follows_scheme() {
        assert!(!test_config("http://localhost:5000").is_secure());
        assert!(test_config("https://shops.example.org").is_secure());
    }

    #[test]
    fn test_admin_credentials_verify() {
        let creds = AdminCredentials::new("admin", "hunter2");
        assert!(creds.verify("admin", "hunter2"));
        assert!(!creds.verify("admin", "hunter3"));
        assert!(!creds.verify("root", "hunter2"));
        assert!(!creds.verify("", ""));
        assert!(!creds.verify("admin", "hunter2 "));
    }

    #[test]
    fn test_admin_credentials_debug_redacts_password() {
        let creds = AdminCredentials::new("admin", "super_secret_admin_pass");
        let debug_output = format!("{creds:?}");
        assert!(debug_output.contains("admin"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_admin_pass"));
    }
}
