//! Persistence seam for donation submissions
//!
//! Handlers talk to `dyn DonationStore`; the server runs on
//! `PgDonationStore`, tests on `MemoryStore`.

pub mod memory;
pub mod postgres;
pub mod submit;

use std::fmt;

use async_trait::async_trait;

use crate::models::{DonorFields, NewDonation, NewDonationItem};

pub use memory::{MemoryStore, StoredDonation, StoredItem};
pub use postgres::PgDonationStore;
pub use submit::{ensure_schema_best_effort, submit_donation};

/// Store-assigned donation identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DonationId(pub i32);

impl fmt::Display for DonationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a submission's rows are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Parent insert, then one independent insert per item, concurrently.
    /// A failing item leaves the donation with the items that did land.
    #[default]
    Independent,

    /// Parent and items in one transaction; all or nothing.
    Atomic,
}

impl WriteMode {
    pub fn from_atomic(atomic: bool) -> Self {
        if atomic {
            Self::Atomic
        } else {
            Self::Independent
        }
    }
}

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{operation} failed: {reason}")]
    Operation {
        operation: &'static str,
        reason: String,
    },
}

/// Backing store for donations and their items.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait DonationStore: Send + Sync {
    /// Create the donation tables if missing. Idempotent.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Insert the donation row and return its id.
    async fn insert_donation(&self, donor: &DonorFields) -> Result<DonationId, StoreError>;

    /// Insert one item referencing `donation_id`.
    async fn insert_item(
        &self,
        donation_id: DonationId,
        item: &NewDonationItem,
    ) -> Result<(), StoreError>;

    /// Insert the donation and all of its items atomically.
    async fn insert_atomic(&self, donation: &NewDonation) -> Result<DonationId, StoreError>;
}
