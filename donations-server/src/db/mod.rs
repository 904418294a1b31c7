//! Database layer - connection pool and schema
//!
//! # Design Principles
//!
//! - One shared `PgPool`, a connection per query - no Arc<Mutex<Connection>>
//! - Schema creation is idempotent (`IF NOT EXISTS` everywhere)
//! - The pool connects lazily so an unreachable database surfaces on the
//!   first query, not at startup

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::DonationRepo;
