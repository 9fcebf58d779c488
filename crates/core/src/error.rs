//! Domain validation errors.

use crate::types::EmailError;

/// Malformed or missing caller input.
///
/// Recoverable by correcting the input; surfaces as a 4xx-equivalent at the
/// HTTP boundary. The tolerant-coercion fields (price, fees, `items_per_row`)
/// never produce this error - see [`crate::normalize`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ValidationError {
    /// A required field was empty or absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The customer email could not be parsed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The referenced category does not exist.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The referenced menu item does not exist.
    #[error("unknown menu item: {0}")]
    UnknownItem(String),

    /// The chosen option is not declared by the menu item.
    #[error("item {item} does not offer option \"{option}\"")]
    UnknownOption {
        /// Menu item id.
        item: String,
        /// Option label the caller sent.
        option: String,
    },

    /// The order contained no lines.
    #[error("order must contain at least one item")]
    EmptyOrder,

    /// A line quantity was below 1.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}
