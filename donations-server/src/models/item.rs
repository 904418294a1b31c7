//! Donation line items
//!
//! An item is accepted when it has a non-empty name, a truthy quantity and a
//! non-empty unit. Quantities keep their decimal text so the `NUMERIC`
//! column receives exactly what the donor typed.

use serde_json::{Map, Value};

/// Validated quantity, stored as canonical decimal text.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity(String);

impl Quantity {
    /// Build a quantity from a JSON value.
    ///
    /// # Rules
    /// - Numbers are accepted unless they are zero
    /// - Strings are accepted when they parse as a finite decimal
    ///   (so `"0"` passes, like any other non-empty string)
    /// - `null`, booleans, arrays and objects are rejected
    ///
    /// # Example
    /// ```
    /// use donations_server::models::Quantity;
    /// use serde_json::json;
    ///
    /// assert!(Quantity::from_json(&json!(5)).is_some());
    /// assert!(Quantity::from_json(&json!("2.5")).is_some());
    /// assert!(Quantity::from_json(&json!(0)).is_none());
    /// ```
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                let magnitude = n.as_f64()?;
                if magnitude == 0.0 {
                    return None;
                }
                Some(Self(n.to_string()))
            }
            Value::String(s) => {
                let trimmed = s.trim();
                let parsed: f64 = trimmed.parse().ok()?;
                if !parsed.is_finite() {
                    return None;
                }
                Some(Self(trimmed.to_owned()))
            }
            _ => None,
        }
    }

    /// Decimal text, suitable for a `$n::numeric` bind.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_f64(&self) -> f64 {
        // Construction guarantees the text parses.
        self.0.parse().unwrap_or_default()
    }
}

/// One validated line item, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonationItem {
    pub nome_item: String,
    pub quantidade: Quantity,
    pub unidade: String,
}

impl NewDonationItem {
    /// Validate a single element of the `items` array.
    ///
    /// Returns `None` when any required field is missing or falsy; the
    /// caller decides which error that becomes.
    pub fn from_json(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;

        Some(Self {
            nome_item: required_text(fields, "nome_item")?,
            quantidade: Quantity::from_json(fields.get("quantidade")?)?,
            unidade: required_text(fields, "unidade")?,
        })
    }
}

fn required_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
