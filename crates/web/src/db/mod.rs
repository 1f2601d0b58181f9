//! Database operations for the `SQLite` store.
//!
//! ## Tables
//!
//! - `shop` - Shops
//! - `product` - Products, each owned by one shop (`ON DELETE CASCADE`)
//! - `tower_sessions` - Session records (created by the session store)
//!
//! # Migrations
//!
//! Migrations live in `crates/web/migrations/`. They are embedded in the
//! binary and applied at start-up, or explicitly with:
//! ```bash
//! cargo run -p shopkeep-cli -- migrate
//! ```

pub mod products;
pub mod shops;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use products::ProductRepository;
pub use shops::ShopRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `SQLite` connection pool.
///
/// The database file is created if it does not exist, and foreign keys are
/// enforced on every connection so product rows cannot outlive their shop.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the file cannot be opened.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
