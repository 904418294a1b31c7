//! In-memory store
//!
//! Mirrors the Postgres tables closely enough to check row counts and
//! foreign keys, and can be told to fail specific operations so partial
//! writes can be reproduced without a database.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{DonationId, DonationStore, StoreError};
use crate::models::{DonorFields, NewDonation, NewDonationItem, Quantity};

/// A persisted `donations` row
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDonation {
    pub id: DonationId,
    pub donor: DonorFields,
    pub created_at: DateTime<Utc>,
}

/// A persisted `donation_items` row
#[derive(Debug, Clone, PartialEq)]
pub struct StoredItem {
    pub id: i32,
    pub donation_id: DonationId,
    pub nome_item: String,
    pub quantidade: Quantity,
    pub unidade: String,
}

#[derive(Debug, Default)]
struct Faults {
    schema: bool,
    donation: bool,
    /// 1-based index of the item insert attempt that fails
    item_attempt: Option<usize>,
}

#[derive(Debug, Default)]
struct MemoryState {
    schema_runs: usize,
    donations: Vec<StoredDonation>,
    items: Vec<StoredItem>,
    next_donation_id: i32,
    next_item_id: i32,
    item_attempts: usize,
    faults: Faults,
}

impl MemoryState {
    /// Count an item insert attempt and report whether it is the one set to fail.
    fn item_attempt_fails(&mut self) -> bool {
        self.item_attempts += 1;
        self.faults.item_attempt == Some(self.item_attempts)
    }

    fn stage_donation(&mut self, donor: &DonorFields) -> StoredDonation {
        self.next_donation_id += 1;
        StoredDonation {
            id: DonationId(self.next_donation_id),
            donor: donor.clone(),
            created_at: Utc::now(),
        }
    }

    fn stage_item(&mut self, donation_id: DonationId, item: &NewDonationItem) -> StoredItem {
        self.next_item_id += 1;
        StoredItem {
            id: self.next_item_id,
            donation_id,
            nome_item: item.nome_item.clone(),
            quantidade: item.quantidade.clone(),
            unidade: item.unidade.clone(),
        }
    }
}

/// Store that keeps rows in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `ensure_schema` call fail.
    pub fn fail_schema(self) -> Self {
        self.state().faults.schema = true;
        self
    }

    /// Make every donation insert fail.
    pub fn fail_donation_insert(self) -> Self {
        self.state().faults.donation = true;
        self
    }

    /// Make the `nth` item insert attempt (1-based, counted across the
    /// store's lifetime) fail.
    pub fn fail_item_attempt(self, nth: usize) -> Self {
        self.state().faults.item_attempt = Some(nth);
        self
    }

    pub fn schema_runs(&self) -> usize {
        self.state().schema_runs
    }

    pub fn donations(&self) -> Vec<StoredDonation> {
        self.state().donations.clone()
    }

    pub fn items(&self) -> Vec<StoredItem> {
        self.state().items.clone()
    }

    pub fn items_for(&self, donation_id: DonationId) -> Vec<StoredItem> {
        self.state()
            .items
            .iter()
            .filter(|item| item.donation_id == donation_id)
            .cloned()
            .collect()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DonationStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut state = self.state();
        if state.faults.schema {
            return Err(StoreError::Operation {
                operation: "create tables",
                reason: "permission denied".into(),
            });
        }
        state.schema_runs += 1;
        Ok(())
    }

    async fn insert_donation(&self, donor: &DonorFields) -> Result<DonationId, StoreError> {
        let mut state = self.state();
        if state.faults.donation {
            return Err(StoreError::Operation {
                operation: "insert donation",
                reason: "connection refused".into(),
            });
        }
        let row = state.stage_donation(donor);
        let id = row.id;
        state.donations.push(row);
        Ok(id)
    }

    async fn insert_item(
        &self,
        donation_id: DonationId,
        item: &NewDonationItem,
    ) -> Result<(), StoreError> {
        let mut state = self.state();
        if state.item_attempt_fails() {
            return Err(StoreError::Operation {
                operation: "insert item",
                reason: "connection reset".into(),
            });
        }
        if !state.donations.iter().any(|d| d.id == donation_id) {
            return Err(StoreError::Operation {
                operation: "insert item",
                reason: format!("donation {} does not exist", donation_id),
            });
        }
        let row = state.stage_item(donation_id, item);
        state.items.push(row);
        Ok(())
    }

    async fn insert_atomic(&self, donation: &NewDonation) -> Result<DonationId, StoreError> {
        let mut state = self.state();
        if state.faults.donation {
            return Err(StoreError::Operation {
                operation: "insert donation",
                reason: "connection refused".into(),
            });
        }

        let parent = state.stage_donation(&donation.donor);
        let mut children = Vec::with_capacity(donation.items.len());
        for item in &donation.items {
            if state.item_attempt_fails() {
                // Rolled back: nothing staged is kept.
                return Err(StoreError::Operation {
                    operation: "insert item",
                    reason: "connection reset".into(),
                });
            }
            children.push(state.stage_item(parent.id, item));
        }

        let id = parent.id;
        state.donations.push(parent);
        state.items.extend(children);
        Ok(id)
    }
}
