//! # Pix Payload Codec
//!
//! ## Purpose
//!
//! Encodes payment parameters into the Pix merchant-presented payload: a
//! nested tag-length-value string closed by a CRC16/CCITT-FALSE field, ready
//! to be rendered as a QR code by an external renderer.
//!
//! ## Architecture Role
//!
//! ```text
//! pix-types → [pix-codec] → QR renderer (external)
//!     ↑            ↓
//! PayeeKey    TLV fields, canonical order
//! Merchant    CRC16 over body + "6304"
//! Amount      final string
//! ```
//!
//! ## What This Crate Contains
//! - [`tlv`]: `TlvField`, `encode_field`, `encode_nested`
//! - [`checksum`]: table-driven CRC16 plus the bitwise reference
//! - [`builder`]: `PixPayloadBuilder`, `PixPayload`, `generate_pay_code`
//! - [`field_ids`]: field catalog and canonical order
//! - [`constants`]: fixed literal values of the format
//!
//! ## What This Crate Does NOT Contain
//! - QR image rendering
//! - Parsing or verifying payloads produced elsewhere
//! - Any network or storage access
//!
//! ## Example
//!
//! ```rust
//! use pix_codec::{PixPayloadBuilder, PointOfInitiation};
//! use pix_types::{MerchantProfile, PayeeKey, TransactionAmount};
//!
//! let payload = PixPayloadBuilder::new(
//!     PayeeKey::email("pix@loja.com.br")?,
//!     MerchantProfile::new("Loja Teste", "São Paulo"),
//! )
//! .with_amount(TransactionAmount::from_decimal_str("12.50")?)
//! .with_point_of_initiation(PointOfInitiation::Dynamic)
//! .with_reference_label("PEDIDO123")
//! .build()?;
//!
//! assert!(pix_codec::checksum_matches(payload.as_str()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod checksum;
pub mod constants;
pub mod error;
pub mod field_ids;
pub mod tlv;

pub use builder::{generate_pay_code, PixPayload, PixPayloadBuilder, PointOfInitiation};
pub use checksum::{checksum_matches, compute_crc16, compute_crc16_bitwise, format_crc16, Crc16};
pub use constants::*;
pub use error::{PixError, PixResult};
pub use field_ids::{AccountField, AdditionalDataField, FieldId, PayloadField};
pub use tlv::{encode_field, encode_nested, TlvField};
