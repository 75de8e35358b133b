//! # TLV Field Builder
//!
//! ## Purpose
//!
//! Converts `(id, value)` pairs, or ordered groups of them, into the
//! `<id:2><len:2><value>` text form. Lengths count characters; values are
//! restricted to ASCII so character and byte counts agree.
//!
//! ```text
//! encode_field("59", "Loja Teste")            → "5910Loja Teste"
//! encode_nested("62", [("05", "PEDIDO123")])  → "62130509PEDIDO123"
//! ```

use crate::constants::MAX_FIELD_VALUE_LEN;
use crate::error::{PixError, PixResult};
use crate::field_ids::{FieldId, PayloadField};
use serde::Serialize;
use std::fmt::Write as _;

/// One validated field: two-digit id and an ASCII value of at most 99 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TlvField {
    id: FieldId,
    value: String,
}

impl TlvField {
    /// Validate and create a field
    pub fn new(id: impl Into<FieldId>, value: impl Into<String>) -> PixResult<Self> {
        let id = id.into();
        let value = value.into();

        if let Some((position, found)) = value.chars().enumerate().find(|(_, c)| !c.is_ascii()) {
            return Err(PixError::NonAsciiField {
                id,
                found,
                position,
            });
        }
        if value.len() > MAX_FIELD_VALUE_LEN {
            return Err(PixError::field_too_long(id, value.len(), MAX_FIELD_VALUE_LEN));
        }

        Ok(Self { id, value })
    }

    /// Create a template field whose value is the concatenation of `children`
    pub fn nested(id: impl Into<FieldId>, children: &[TlvField]) -> PixResult<Self> {
        let mut value = String::with_capacity(children.iter().map(TlvField::encoded_len).sum());
        for child in children {
            child.encode_into(&mut value);
        }
        Self::new(id, value)
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Catalog entry for a top-level field, if the id is known
    pub fn payload_field(&self) -> Option<PayloadField> {
        PayloadField::try_from(self.id.value()).ok()
    }

    /// Length of the encoded form (`4 + value length`)
    pub fn encoded_len(&self) -> usize {
        4 + self.value.len()
    }

    /// Append the encoded form to `out`
    pub fn encode_into(&self, out: &mut String) {
        // Writing to a String cannot fail
        let _ = write!(out, "{}{:02}{}", self.id, self.value.len(), self.value);
    }

    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }
}

/// Encode one field: id + two-digit zero-padded length + value
pub fn encode_field(id: impl Into<FieldId>, value: &str) -> PixResult<String> {
    Ok(TlvField::new(id, value)?.encode())
}

/// Encode `children` in order and wrap them in a single field
pub fn encode_nested(id: impl Into<FieldId>, children: &[TlvField]) -> PixResult<String> {
    Ok(TlvField::nested(id, children)?.encode())
}
