//! Custom Axum extractors

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::Value;

use super::error::ApiError;
use crate::models::DonationRequest;

/// Extract a `DonationRequest`, answering rejections in the API envelope.
///
/// A request without a JSON content type is read as an empty object, so it
/// fails validation with "no items" rather than a media-type error. A
/// top-level array carries no fields either and is treated the same way.
/// Other non-object bodies are malformed.
pub struct DonationBody(pub DonationRequest);

impl<S> FromRequest<S> for DonationBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => value,
            Err(JsonRejection::MissingJsonContentType(_)) => {
                return Ok(Self(DonationRequest::default()))
            }
            Err(rejection) => {
                return Err(ApiError::MalformedBody {
                    detail: rejection.body_text(),
                })
            }
        };

        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map(Self)
                .map_err(|e| ApiError::MalformedBody {
                    detail: e.to_string(),
                }),
            Value::Array(_) => Ok(Self(DonationRequest::default())),
            _ => Err(ApiError::MalformedBody {
                detail: "expected a JSON object".into(),
            }),
        }
    }
}
