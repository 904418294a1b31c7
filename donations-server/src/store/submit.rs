//! Writing a validated submission

use futures::future::join_all;

use super::{DonationId, DonationStore, StoreError, WriteMode};
use crate::models::NewDonation;

/// Persist a validated donation.
///
/// In `Independent` mode the donation row goes in first, then every item
/// insert is issued at once and awaited as a batch. All of them run to
/// completion even when one fails; the first failure is returned after the
/// batch settles. Rows that landed stay, so a failure here can leave a
/// donation with fewer items than submitted.
pub async fn submit_donation(
    store: &dyn DonationStore,
    donation: &NewDonation,
    mode: WriteMode,
) -> Result<DonationId, StoreError> {
    match mode {
        WriteMode::Atomic => store.insert_atomic(donation).await,
        WriteMode::Independent => {
            let donation_id = store.insert_donation(&donation.donor).await?;

            let results = join_all(
                donation
                    .items
                    .iter()
                    .map(|item| store.insert_item(donation_id, item)),
            )
            .await;

            let submitted = results.len();
            let mut failures = results.into_iter().filter_map(Result::err);
            match failures.next() {
                None => Ok(donation_id),
                Some(first) => {
                    let failed = 1 + failures.count();
                    tracing::warn!(
                        donation_id = %donation_id,
                        inserted = submitted - failed,
                        submitted,
                        "donation persisted with missing items"
                    );
                    Err(first)
                }
            }
        }
    }
}

/// Create the schema, logging instead of failing.
///
/// Returns whether the schema is known to be in place. Startup goes on
/// either way; writes will fail at the store until the tables exist.
pub async fn ensure_schema_best_effort(store: &dyn DonationStore) -> bool {
    match store.ensure_schema().await {
        Ok(()) => {
            tracing::info!("Donation schema ready");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create donation tables; continuing startup");
            false
        }
    }
}
