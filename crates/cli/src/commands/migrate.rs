//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! shopkeep-cli migrate
//! ```
//!
//! # Migration Files
//!
//! Schema migrations live in `crates/web/migrations/` and are embedded in the
//! `shopkeep-web` library. The session table is created by the session store.

use thiserror::Error;

use shopkeep_web::{db, middleware::create_session_store};

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply schema migrations and create the session table.
///
/// # Errors
///
/// Returns `MigrationError` if the database cannot be opened or a migration
/// fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = super::connect().await?;

    tracing::info!("Running schema migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Creating session table...");
    create_session_store(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
