//! # Field Catalog - Pix Payload Field Registry
//!
//! ## Purpose
//!
//! Registry of the field ids used by the encoder, at the top level and inside
//! the two nested templates (merchant account information and additional
//! data). The builder emits top-level fields by walking
//! [`PayloadField::CANONICAL_ORDER`]; the checksum and many validators
//! depend on that order even though the format is self-describing.
//!
//! ```text
//! 00 01 [01] 26{00 01 [02]} 52 53 [54] 58 59 60 [62{05}] 63
//! ```

use num_enum::TryFromPrimitive;
use serde::{Serialize, Serializer};
use std::fmt;

/// Two-digit numeric field id (00-99)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(u8);

impl FieldId {
    /// Largest id representable with two digits
    pub const MAX: u8 = 99;

    /// Create an id, `None` above 99
    pub fn new(id: u8) -> Option<Self> {
        (id <= Self::MAX).then_some(Self(id))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl Serialize for FieldId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Top-level payload fields used by this encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum PayloadField {
    PayloadFormatIndicator = 0,
    PointOfInitiationMethod = 1,
    MerchantAccountInformation = 26,
    MerchantCategoryCode = 52,
    TransactionCurrency = 53,
    TransactionAmount = 54,
    CountryCode = 58,
    MerchantName = 59,
    MerchantCity = 60,
    AdditionalDataField = 62,
    Crc16 = 63,
}

impl PayloadField {
    /// Wire order of the top-level fields
    pub const CANONICAL_ORDER: [PayloadField; 11] = [
        PayloadField::PayloadFormatIndicator,
        PayloadField::PointOfInitiationMethod,
        PayloadField::MerchantAccountInformation,
        PayloadField::MerchantCategoryCode,
        PayloadField::TransactionCurrency,
        PayloadField::TransactionAmount,
        PayloadField::CountryCode,
        PayloadField::MerchantName,
        PayloadField::MerchantCity,
        PayloadField::AdditionalDataField,
        PayloadField::Crc16,
    ];

    pub fn id(&self) -> FieldId {
        FieldId(*self as u8)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PayloadField::PayloadFormatIndicator => "payload_format_indicator",
            PayloadField::PointOfInitiationMethod => "point_of_initiation_method",
            PayloadField::MerchantAccountInformation => "merchant_account_information",
            PayloadField::MerchantCategoryCode => "merchant_category_code",
            PayloadField::TransactionCurrency => "transaction_currency",
            PayloadField::TransactionAmount => "transaction_amount",
            PayloadField::CountryCode => "country_code",
            PayloadField::MerchantName => "merchant_name",
            PayloadField::MerchantCity => "merchant_city",
            PayloadField::AdditionalDataField => "additional_data_field",
            PayloadField::Crc16 => "crc16",
        }
    }

    /// Whether the field may be left out of a payload
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            PayloadField::PointOfInitiationMethod
                | PayloadField::TransactionAmount
                | PayloadField::AdditionalDataField
        )
    }
}

/// Sub-fields of the merchant account information template (26)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum AccountField {
    Gui = 0,
    Key = 1,
    Description = 2,
}

impl AccountField {
    pub fn id(&self) -> FieldId {
        FieldId(*self as u8)
    }
}

/// Sub-fields of the additional data template (62)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum AdditionalDataField {
    ReferenceLabel = 5,
}

impl AdditionalDataField {
    pub fn id(&self) -> FieldId {
        FieldId(*self as u8)
    }
}

impl From<PayloadField> for FieldId {
    fn from(field: PayloadField) -> Self {
        field.id()
    }
}

impl From<AccountField> for FieldId {
    fn from(field: AccountField) -> Self {
        field.id()
    }
}

impl From<AdditionalDataField> for FieldId {
    fn from(field: AdditionalDataField) -> Self {
        field.id()
    }
}
