//! Encoding errors for Pix payload construction
//!
//! All failures are local validation failures raised before the checksum is
//! computed; the encoder never returns a partial or unchecksummed payload.
//! Key and amount failures come from `pix-types` and are wrapped unchanged.

use crate::field_ids::FieldId;
use pix_types::{AmountError, KeyError};
use thiserror::Error;

/// Payload encoding errors with diagnostic context
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PixError {
    /// Payee key failed its type-specific format check
    #[error(transparent)]
    InvalidKey(#[from] KeyError),

    /// Amount is negative, not finite, or does not fit its field
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// Field value cannot be described by a two-digit length prefix
    #[error("Field {id} too long: {len} characters exceeds limit {max} (cause: {likely_cause})")]
    FieldTooLong {
        id: FieldId,
        len: usize,
        max: usize,
        likely_cause: String,
    },

    /// Field value contains a character outside ASCII
    #[error("Field {id} contains non-ASCII character {found:?} at position {position}")]
    NonAsciiField {
        id: FieldId,
        found: char,
        position: usize,
    },

    /// Reference label is neither `***` nor 1-25 alphanumerics
    #[error("Invalid reference label '{label}': {reason}")]
    InvalidReferenceLabel { label: String, reason: String },

    /// Merchant name or city is empty after sanitization
    #[error("Merchant {field} is empty after ASCII sanitization")]
    MissingMerchantField { field: &'static str },
}

impl PixError {
    /// Create FieldTooLong with a hint about which input overflowed
    pub fn field_too_long(id: FieldId, len: usize, max: usize) -> Self {
        let likely_cause = match id.value() {
            26 => "payee key plus description exceed the account template",
            62 => "reference label too long for the additional data template",
            2 => "description too long",
            _ => "value exceeds two-digit length prefix",
        };

        Self::FieldTooLong {
            id,
            len,
            max,
            likely_cause: likely_cause.to_string(),
        }
    }

    /// Create InvalidReferenceLabel
    pub fn invalid_reference_label(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidReferenceLabel {
            label: label.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for payload operations
pub type PixResult<T> = std::result::Result<T, PixError>;
