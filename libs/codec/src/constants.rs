//! # Payload Constants - Fixed Values of the Pix Merchant-Presented Format
//!
//! ## Purpose
//!
//! Literal field values and limits defined by the payment network. These
//! are not configuration: a scanning app rejects a payload whose constant
//! fields differ from these values.

/// Field 00: payload format indicator
pub const PAYLOAD_FORMAT_INDICATOR: &str = "01";

/// Field 26/00: globally unique identifier of the Pix arrangement
pub const PIX_GUI: &str = "br.gov.bcb.pix";

/// Field 52: merchant category code (not informed)
pub const MERCHANT_CATEGORY_CODE: &str = "0000";

/// Field 53: ISO 4217 numeric code for the Brazilian Real
pub const CURRENCY_BRL: &str = "986";

/// Field 58: ISO 3166-1 alpha-2 country code
pub const COUNTRY_CODE: &str = "BR";

/// Largest value length a two-digit length prefix can express
pub const MAX_FIELD_VALUE_LEN: usize = 99;

/// Length of the CRC field value (4 hex digits)
pub const CRC_VALUE_LEN: usize = 4;

/// CRC field id and length prefix; included in the checksummed data
pub const CRC_FIELD_PREFIX: &str = "6304";

/// Longest reference label (field 62/05)
pub const REFERENCE_LABEL_MAX_LEN: usize = 25;

/// Reference label meaning "no transaction id"
pub const REFERENCE_LABEL_WILDCARD: &str = "***";
