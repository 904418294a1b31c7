//! Donation submission endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::DonationBody;
use crate::http::server::AppState;
use crate::models::NewDonation;
use crate::store::submit_donation;

/// Message returned when a donation is stored
pub const SUCCESS_MESSAGE: &str = "Doação salva com sucesso!";

/// Submission response
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /donation - validate, then write the donation and its items
async fn submit(
    State(state): State<Arc<AppState>>,
    DonationBody(request): DonationBody,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let donation = NewDonation::validate(request).inspect_err(|e| {
        tracing::debug!(error = ?e, "Rejected donation submission");
    })?;

    let donation_id = submit_donation(state.store.as_ref(), &donation, state.write_mode).await?;
    tracing::info!(
        donation_id = %donation_id,
        items = donation.items.len(),
        "Donation saved"
    );

    Ok(Json(SubmissionResponse {
        success: true,
        message: SUCCESS_MESSAGE,
    }))
}

/// Donation routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/donation", post(submit))
}
