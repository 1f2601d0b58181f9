//! Session middleware configuration.
//!
//! Sessions are stored in the `SQLite` database; the browser only holds the
//! session id in a cookie signed with a key derived from the configured
//! session secret. A tampered or foreign cookie fails verification and the
//! request is treated as anonymous.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use sqlx::SqlitePool;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::AppConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "shopkeep_session";

/// Session expiry time in seconds (12 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 12 * 60 * 60;

/// The session layer type used by the router.
pub type SessionLayer = SessionManagerLayer<SqliteStore, SignedCookie>;

/// Create the session store and make sure its table exists.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table cannot be created.
pub async fn create_session_store(pool: &SqlitePool) -> Result<SqliteStore, sqlx::Error> {
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;
    Ok(store)
}

/// Create the session layer.
///
/// # Arguments
///
/// * `store` - `SQLite` session store
/// * `config` - Application configuration (for the session secret and scheme)
#[must_use]
pub fn create_session_layer(store: SqliteStore, config: &AppConfig) -> SessionLayer {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(&config.session_secret))
}

/// Derive the 64-byte cookie signing key from the session secret.
fn signing_key(secret: &SecretString) -> Key {
    let digest = Sha512::digest(secret.expose_secret().as_bytes());
    Key::from(digest.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_is_deterministic() {
        let a = signing_key(&SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"));
        let b = signing_key(&SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"));
        let c = signing_key(&SecretString::from("zZ9!qW8@eR7#tY6$uI5%oP4^aS3&dF2"));
        assert_eq!(a.master(), b.master());
        assert_ne!(a.master(), c.master());
    }
}
