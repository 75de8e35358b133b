//! Error types for payee key validation, amount formatting and payment-method storage
//!
//! Every variant carries the offending input so callers can report exactly
//! which value was refused. None of these errors are transient: retrying with
//! the same input yields the same failure.

use thiserror::Error;

use crate::payee_key::PayeeKeyKind;

/// Errors that can occur while normalizing and validating a payee key
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KeyError {
    /// Digit count after normalization does not match the key type
    #[error("Invalid {kind} key '{input}': expected {expected} digits, got {got}")]
    WrongLength {
        kind: PayeeKeyKind,
        input: String,
        expected: usize,
        got: usize,
    },

    /// Key contains characters outside the type's charset
    #[error("Invalid {kind} key '{input}': unexpected character {found:?}")]
    InvalidCharacter {
        kind: PayeeKeyKind,
        input: String,
        found: char,
    },

    /// CPF/CNPJ verification digits do not match
    #[error("Invalid {kind} key '{input}': check digits do not verify")]
    CheckDigitMismatch { kind: PayeeKeyKind, input: String },

    /// Key is syntactically malformed for its type
    #[error("Invalid {kind} key '{input}': {reason}")]
    Malformed {
        kind: PayeeKeyKind,
        input: String,
        reason: String,
    },
}

impl KeyError {
    /// Create a Malformed error with a free-form reason
    pub fn malformed(kind: PayeeKeyKind, input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            kind,
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Key type the failed validation was performed for
    pub fn kind(&self) -> PayeeKeyKind {
        match self {
            Self::WrongLength { kind, .. }
            | Self::InvalidCharacter { kind, .. }
            | Self::CheckDigitMismatch { kind, .. }
            | Self::Malformed { kind, .. } => *kind,
        }
    }
}

/// Errors that can occur while building a transaction amount
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmountError {
    /// Amount is below zero
    #[error("Invalid amount {value}: must not be negative")]
    Negative { value: String },

    /// Value is not finite (NaN or infinity)
    #[error("Invalid amount: value is not finite ({value})")]
    NotFinite { value: f64 },

    /// Invalid decimal string format
    #[error("Invalid amount: '{input}' is not a decimal number")]
    InvalidDecimal { input: String },

    /// Formatted amount does not fit the amount field
    #[error("Invalid amount {formatted}: {len} characters exceeds field limit {max}")]
    TooLarge {
        formatted: String,
        len: usize,
        max: usize,
    },
}

/// Errors reported by payment-method stores
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// No record with the requested id
    #[error("Payment method {id} not found")]
    NotFound { id: uuid::Uuid },

    /// A record with the same id already exists
    #[error("Payment method {id} already exists")]
    Duplicate { id: uuid::Uuid },

    /// Backend-specific failure
    #[error("Payment method store failure: {0}")]
    Backend(String),
}
