//! Donation submissions
//!
//! `DonationRequest` is the wire shape of `POST /donation`. Donor fields
//! default to the empty string; `items` is kept as raw JSON so that a
//! missing, null or non-array value can be reported as "no items" instead
//! of a deserialization failure.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use super::{NewDonationItem, ValidationError};

/// Donor contact and address fields.
///
/// All free text, empty allowed, no format checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DonorFields {
    #[serde(default, deserialize_with = "text_field")]
    pub nome: String,
    #[serde(default, deserialize_with = "text_field")]
    pub endereco: String,
    #[serde(default, deserialize_with = "text_field")]
    pub numero: String,
    #[serde(default, deserialize_with = "text_field")]
    pub complemento: String,
    #[serde(default, deserialize_with = "text_field")]
    pub bairro: String,
    #[serde(default, deserialize_with = "text_field")]
    pub cidade: String,
    #[serde(default, deserialize_with = "text_field")]
    pub estado: String,
    #[serde(default, deserialize_with = "text_field")]
    pub cep: String,
    #[serde(default, deserialize_with = "text_field")]
    pub obs: String,
}

/// Body of `POST /donation`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonationRequest {
    #[serde(flatten)]
    pub donor: DonorFields,

    #[serde(default)]
    pub items: Option<Value>,
}

/// A submission that passed validation and may be written.
///
/// `items` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonation {
    pub donor: DonorFields,
    pub items: Vec<NewDonationItem>,
}

impl NewDonation {
    /// Validate a request.
    ///
    /// Every item is checked before this returns, so a rejected submission
    /// never leads to a write.
    pub fn validate(request: DonationRequest) -> Result<Self, ValidationError> {
        let raw_items = match request.items {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(ValidationError::NoItems),
        };

        let items = raw_items
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                NewDonationItem::from_json(raw).ok_or(ValidationError::ItemMissingField { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            donor: request.donor,
            items,
        })
    }
}

/// Accept any scalar as text; `null` becomes the empty string.
///
/// Forms often send `numero` or `cep` as JSON numbers.
fn text_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) => Err(de::Error::custom("expected text, found an array")),
        Value::Object(_) => Err(de::Error::custom("expected text, found an object")),
    }
}
