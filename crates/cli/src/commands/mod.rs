//! CLI subcommands.

pub mod migrate;
pub mod seed;
pub mod shops;

use sqlx::SqlitePool;

use shopkeep_web::{config, db};

/// Open the configured database.
async fn connect() -> Result<SqlitePool, sqlx::Error> {
    let database_url = config::database_url_from_env();
    tracing::info!(database_url = %database_url, "Connecting to database...");
    db::create_pool(&database_url).await
}
