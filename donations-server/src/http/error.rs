//! API error types with IntoResponse
//!
//! Every error becomes `{ "success": false, "error": "..." }`. Store
//! failures are logged in full and answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::ValidationError;
use crate::store::StoreError;

/// Message returned for any store failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno ao salvar a doação.";

/// Message returned when the body is not a JSON object
pub const MALFORMED_BODY_MESSAGE: &str = "Requisição JSON inválida.";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Body could not be read as a submission (400, detail logged)
    MalformedBody { detail: String },

    /// Store error (500, logged)
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::MalformedBody { detail } => {
                tracing::warn!(%detail, "Rejected malformed donation body");
                (StatusCode::BAD_REQUEST, MALFORMED_BODY_MESSAGE.to_owned())
            }
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Failed to save donation: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_owned(),
                )
            }
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
