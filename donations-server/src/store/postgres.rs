//! PostgreSQL-backed store

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DonationId, DonationStore, StoreError};
use crate::db::repos::DonationRepo;
use crate::db::schema;
use crate::models::{DonorFields, NewDonation, NewDonationItem};

/// Store over a shared `PgPool`.
///
/// Cloning is cheap; every query acquires its own pooled connection.
#[derive(Clone)]
pub struct PgDonationStore {
    pool: PgPool,
}

impl PgDonationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DonationStore for PgDonationStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        schema::create_tables(&self.pool).await?;
        Ok(())
    }

    async fn insert_donation(&self, donor: &DonorFields) -> Result<DonationId, StoreError> {
        let id = DonationRepo::new(&self.pool).insert_donation(donor).await?;
        Ok(DonationId(id))
    }

    async fn insert_item(
        &self,
        donation_id: DonationId,
        item: &NewDonationItem,
    ) -> Result<(), StoreError> {
        DonationRepo::new(&self.pool)
            .insert_item(donation_id.0, item)
            .await?;
        Ok(())
    }

    async fn insert_atomic(&self, donation: &NewDonation) -> Result<DonationId, StoreError> {
        let id = DonationRepo::new(&self.pool)
            .insert_with_items(donation)
            .await?;
        Ok(DonationId(id))
    }
}
