//! Schema command
//!
//! Same statements the server runs at startup, but a failure exits non-zero.

use anyhow::{Context, Result};
use clap::Parser;

use donations_server::db::create_pool_with_options;
use donations_server::{DonationStore, PgDonationStore};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (falls back to PGHOST/PGUSER/... when unset)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create the donation tables
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool_with_options(args.database_url.as_deref(), 1)
        .context("Invalid database configuration")?;

    PgDonationStore::new(pool)
        .ensure_schema()
        .await
        .context("Failed to create donation tables")?;

    println!("Donation tables are ready");
    Ok(())
}
