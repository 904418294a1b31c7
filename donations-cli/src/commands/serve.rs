//! HTTP server command
//!
//! Runs the donation intake server. Schema creation failure is logged and
//! the server starts anyway.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use donations_server::db::create_pool_with_options;
use donations_server::http::server::DEFAULT_PORT;
use donations_server::http::{run_server, ServerConfig};
use donations_server::{PgDonationStore, WriteMode};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Database URL (falls back to PGHOST/PGUSER/... when unset)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Comma-separated CORS origins (default: any origin)
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Write each donation and its items in a single transaction
    #[arg(long, env = "DONATION_ATOMIC")]
    pub atomic: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let bind_addr = SocketAddr::new(args.host, args.port);
    tracing::info!("Starting donations server on {}", bind_addr);

    let pool = create_pool_with_options(args.database_url.as_deref(), args.max_connections)
        .context("Invalid database configuration")?;

    let config = ServerConfig {
        bind_addr,
        allowed_origins: args.allowed_origins,
        write_mode: WriteMode::from_atomic(args.atomic),
    };

    // Run server (blocks until shutdown)
    run_server(Arc::new(PgDonationStore::new(pool)), config)
        .await
        .context("Server error")?;

    Ok(())
}
