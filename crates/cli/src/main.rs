//! Shopkeep CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply schema migrations and create the session table
//! shopkeep-cli migrate
//!
//! # Insert a demo shop with a few products
//! shopkeep-cli seed
//!
//! # List shops with their product counts
//! shopkeep-cli shops
//! ```
//!
//! The database is taken from `SHOPKEEP_DATABASE_URL` (or `DATABASE_URL`),
//! defaulting to `sqlite://shops.db`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopkeep-cli")]
#[command(author, version, about = "Shopkeep CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert a demo shop with products
    Seed,
    /// List shops with their product counts
    Shops,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::demo_shop().await?,
        Commands::Shops => commands::shops::list().await?,
    }
    Ok(())
}
