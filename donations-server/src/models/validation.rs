//! Validation error types

use std::fmt;

/// Validation error for inbound submissions.
///
/// The `Display` text is returned to the caller verbatim, so it stays in
/// the language the intake form is served in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `items` is absent, null, not an array, or empty
    NoItems,

    /// The item at `index` lacks a name, a truthy quantity, or a unit
    ItemMissingField { index: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoItems => write!(f, "Nenhum item enviado."),
            Self::ItemMissingField { .. } => {
                write!(f, "Cada item precisa ter nome, quantidade e unidade.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
