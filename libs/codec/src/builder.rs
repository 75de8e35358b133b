//! # Pix Payload Builder - Merchant-Presented Code Construction
//!
//! ## Purpose
//!
//! Assembles typed payment parameters into the ordered TLV payload, appends
//! the CRC16 field and returns an immutable [`PixPayload`]. The builder is the
//! only place that knows the top-level field order.
//!
//! ## Architecture
//!
//! ```text
//! PayeeKey ─┐
//! Merchant ─┼→ [PixPayloadBuilder] → TlvField list → body + "6304" → CRC16 → PixPayload
//! Amount? ──┘
//! ```
//!
//! Nothing is shared between calls: each build works on its own fields and
//! returns a freshly allocated string, so builders can run on any thread.

use crate::checksum::{compute_crc16, format_crc16};
use crate::constants::{
    COUNTRY_CODE, CRC_FIELD_PREFIX, CRC_VALUE_LEN, CURRENCY_BRL, MERCHANT_CATEGORY_CODE,
    PAYLOAD_FORMAT_INDICATOR, PIX_GUI, REFERENCE_LABEL_MAX_LEN, REFERENCE_LABEL_WILDCARD,
};
use crate::error::{PixError, PixResult};
use crate::field_ids::{AccountField, AdditionalDataField, PayloadField};
use crate::tlv::TlvField;
use pix_types::{fold_to_ascii, MerchantProfile, PayeeKey, TransactionAmount};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use tracing::debug;

/// Point of initiation method (field 01)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointOfInitiation {
    /// Code may be paid many times
    Static,
    /// Code is meant for a single payment
    Dynamic,
}

impl PointOfInitiation {
    pub fn field_value(&self) -> &'static str {
        match self {
            PointOfInitiation::Static => "11",
            PointOfInitiation::Dynamic => "12",
        }
    }
}

/// Complete, checksummed payload
///
/// Built once by [`PixPayloadBuilder::build`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixPayload {
    #[serde(rename = "payload")]
    encoded: String,
    #[serde(serialize_with = "serialize_crc")]
    crc: u16,
    fields: Vec<TlvField>,
}

impl PixPayload {
    /// Final payload string, ready for a QR renderer
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn into_string(self) -> String {
        self.encoded
    }

    pub fn crc(&self) -> u16 {
        self.crc
    }

    /// Top-level fields in wire order, CRC field last
    pub fn fields(&self) -> &[TlvField] {
        &self.fields
    }

    pub fn field(&self, field: PayloadField) -> Option<&TlvField> {
        self.fields.iter().find(|f| f.id() == field.id())
    }
}

impl fmt::Display for PixPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl AsRef<str> for PixPayload {
    fn as_ref(&self) -> &str {
        &self.encoded
    }
}

fn serialize_crc<S: Serializer>(crc: &u16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_crc16(*crc))
}

/// Fluent builder for a [`PixPayload`]
#[derive(Debug, Clone)]
pub struct PixPayloadBuilder {
    key: PayeeKey,
    merchant: MerchantProfile,
    amount: Option<TransactionAmount>,
    description: Option<String>,
    reference_label: Option<String>,
    point_of_initiation: Option<PointOfInitiation>,
}

impl PixPayloadBuilder {
    /// Start a payload for a validated key and a sanitized merchant
    pub fn new(key: PayeeKey, merchant: MerchantProfile) -> Self {
        Self {
            key,
            merchant,
            amount: None,
            description: None,
            reference_label: None,
            point_of_initiation: None,
        }
    }

    /// Fixed amount; without one the payer enters the amount
    pub fn with_amount(mut self, amount: TransactionAmount) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Free-text description shown to the payer (field 26/02)
    ///
    /// Folded to ASCII; omitted when empty after folding.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reference label / transaction id (field 62/05)
    pub fn with_reference_label(mut self, label: impl Into<String>) -> Self {
        self.reference_label = Some(label.into());
        self
    }

    pub fn with_point_of_initiation(mut self, method: PointOfInitiation) -> Self {
        self.point_of_initiation = Some(method);
        self
    }

    /// Validate every field and produce the checksummed payload
    pub fn build(self) -> PixResult<PixPayload> {
        if self.merchant.name().is_empty() {
            return Err(PixError::MissingMerchantField { field: "name" });
        }
        if self.merchant.city().is_empty() {
            return Err(PixError::MissingMerchantField { field: "city" });
        }

        let mut fields = Vec::with_capacity(PayloadField::CANONICAL_ORDER.len());
        for field in PayloadField::CANONICAL_ORDER {
            if field == PayloadField::Crc16 {
                continue;
            }
            match self.body_field(field)? {
                Some(tlv) => fields.push(tlv),
                None => debug_assert!(field.is_optional(), "{} is mandatory", field.name()),
            }
        }

        let body_len: usize = fields.iter().map(TlvField::encoded_len).sum();
        let mut encoded = String::with_capacity(body_len + CRC_FIELD_PREFIX.len() + CRC_VALUE_LEN);
        for field in &fields {
            field.encode_into(&mut encoded);
        }
        encoded.push_str(CRC_FIELD_PREFIX);

        let crc = compute_crc16(&encoded);
        let crc_hex = format_crc16(crc);
        encoded.push_str(&crc_hex);
        fields.push(TlvField::new(PayloadField::Crc16, crc_hex)?);

        debug!(
            "Built Pix payload: {} fields, {} chars, key type {}, crc {:04X}",
            fields.len(),
            encoded.len(),
            self.key.kind(),
            crc
        );

        Ok(PixPayload {
            encoded,
            crc,
            fields,
        })
    }

    /// Value of one top-level field, `None` when an optional field is absent
    fn body_field(&self, field: PayloadField) -> PixResult<Option<TlvField>> {
        let tlv = match field {
            PayloadField::PayloadFormatIndicator => TlvField::new(field, PAYLOAD_FORMAT_INDICATOR)?,
            PayloadField::PointOfInitiationMethod => match self.point_of_initiation {
                Some(method) => TlvField::new(field, method.field_value())?,
                None => return Ok(None),
            },
            PayloadField::MerchantAccountInformation => self.merchant_account_information()?,
            PayloadField::MerchantCategoryCode => TlvField::new(field, MERCHANT_CATEGORY_CODE)?,
            PayloadField::TransactionCurrency => TlvField::new(field, CURRENCY_BRL)?,
            PayloadField::TransactionAmount => match &self.amount {
                Some(amount) => TlvField::new(field, amount.to_field_value())?,
                None => return Ok(None),
            },
            PayloadField::CountryCode => TlvField::new(field, COUNTRY_CODE)?,
            PayloadField::MerchantName => TlvField::new(field, self.merchant.name())?,
            PayloadField::MerchantCity => TlvField::new(field, self.merchant.city())?,
            PayloadField::AdditionalDataField => match &self.reference_label {
                Some(label) => additional_data(label)?,
                None => return Ok(None),
            },
            // Computed over the assembled body
            PayloadField::Crc16 => return Ok(None),
        };
        Ok(Some(tlv))
    }

    fn merchant_account_information(&self) -> PixResult<TlvField> {
        let mut children = vec![
            TlvField::new(AccountField::Gui, PIX_GUI)?,
            TlvField::new(AccountField::Key, self.key.as_str())?,
        ];

        if let Some(description) = &self.description {
            let folded = fold_to_ascii(description);
            if !folded.is_empty() {
                children.push(TlvField::new(AccountField::Description, folded)?);
            }
        }

        TlvField::nested(PayloadField::MerchantAccountInformation, &children)
    }
}

fn additional_data(label: &str) -> PixResult<TlvField> {
    validate_reference_label(label)?;
    let reference = TlvField::new(AdditionalDataField::ReferenceLabel, label)?;
    TlvField::nested(PayloadField::AdditionalDataField, &[reference])
}

fn validate_reference_label(label: &str) -> PixResult<()> {
    if label == REFERENCE_LABEL_WILDCARD {
        return Ok(());
    }
    if label.is_empty() {
        return Err(PixError::invalid_reference_label(label, "must not be empty"));
    }
    if label.chars().count() > REFERENCE_LABEL_MAX_LEN {
        return Err(PixError::invalid_reference_label(
            label,
            format!("longer than {} characters", REFERENCE_LABEL_MAX_LEN),
        ));
    }
    if !label.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PixError::invalid_reference_label(
            label,
            "only ASCII letters and digits are allowed",
        ));
    }
    Ok(())
}

/// Generate the payload string for a key, an optional fixed amount and a merchant
///
/// Pure and deterministic: identical arguments always yield the identical
/// string. Either the complete checksummed payload is returned or an error.
///
/// # Examples
/// ```
/// use pix_codec::generate_pay_code;
/// use pix_types::{MerchantProfile, PayeeKey};
///
/// let key = PayeeKey::cnpj("12345678000195")?;
/// let merchant = MerchantProfile::new("Loja Teste", "SAO PAULO");
/// let code = generate_pay_code(&key, None, &merchant)?;
/// assert!(code.ends_with("6304A92C"));
/// # Ok::<(), pix_codec::PixError>(())
/// ```
pub fn generate_pay_code(
    key: &PayeeKey,
    amount: Option<TransactionAmount>,
    merchant: &MerchantProfile,
) -> PixResult<String> {
    let mut builder = PixPayloadBuilder::new(key.clone(), merchant.clone());
    if let Some(amount) = amount {
        builder = builder.with_amount(amount);
    }
    Ok(builder.build()?.into_string())
}
