//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Create a PostgreSQL connection pool.
///
/// With no URL the libpq environment variables (`PGHOST`, `PGPORT`,
/// `PGUSER`, `PGPASSWORD`, `PGDATABASE`) are used.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed. No connection is opened
/// here.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(Some("postgres://localhost/donations"))?;
/// ```
pub fn create_pool(database_url: Option<&str>) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS)
}

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string, or `None` for `PG*` env
/// * `max_connections` - Maximum number of connections in the pool
pub fn create_pool_with_options(
    database_url: Option<&str>,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let options = match database_url {
        Some(url) => url.parse::<PgConnectOptions>()?,
        None => PgConnectOptions::new(),
    };

    Ok(PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_lazy_with(options))
}
