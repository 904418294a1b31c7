//! HTTP server layer
//!
//! Axum server with:
//! - CORS (any origin unless an allow-list is configured)
//! - Request tracing
//! - Graceful shutdown
//! - `{success, error}` JSON envelopes for every failure

pub mod server;
pub mod error;
pub mod extractors;
pub mod routes;

pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use error::ApiError;
