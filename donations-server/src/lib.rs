//! donations-server: HTTP intake for donor submissions
//!
//! Accepts a donation (donor contact and address fields plus a list of
//! items) on `POST /donation` and stores it as one `donations` row and one
//! `donation_items` row per item.

pub mod db;
pub mod http;
pub mod models;
pub mod store;

pub use http::{build_router, run_server, AppState, ServerConfig};
pub use store::{DonationStore, MemoryStore, PgDonationStore, StoreError, WriteMode};
