//! Error formatting tests for payload encoding failures
//!
//! Display output is what the CLI prints; it must name the offending field or
//! input so the merchant can fix the configuration.

use pix_codec::{FieldId, PayloadField, PixError, PixPayloadBuilder};
use pix_types::{MerchantProfile, PayeeKey, TransactionAmount};

#[test]
fn test_field_too_long_formatting() {
    let error = PixError::field_too_long(PayloadField::MerchantAccountInformation.id(), 104, 99);

    let display_output = format!("{}", error);
    assert!(display_output.contains("Field 26 too long"));
    assert!(display_output.contains("104 characters"));
    assert!(display_output.contains("limit 99"));
    assert!(display_output.contains("payee key plus description"));

    let debug_output = format!("{:?}", error);
    assert!(debug_output.contains("FieldTooLong"));
}

#[test]
fn test_field_too_long_generic_cause() {
    let error = PixError::field_too_long(FieldId::new(59).unwrap(), 120, 99);
    assert!(format!("{}", error).contains("two-digit length prefix"));
}

#[test]
fn test_invalid_key_is_transparent() {
    let error: PixError = PayeeKey::cpf("5299822472").unwrap_err().into();

    let display_output = format!("{}", error);
    assert!(display_output.contains("Invalid cpf key '5299822472'"));
    assert!(display_output.contains("expected 11 digits, got 10"));
}

#[test]
fn test_invalid_amount_is_transparent() {
    let error: PixError = TransactionAmount::from_decimal_str("-1").unwrap_err().into();
    assert_eq!(format!("{}", error), "Invalid amount -1: must not be negative");
}

#[test]
fn test_reference_label_formatting() {
    let error = PixPayloadBuilder::new(
        PayeeKey::cnpj("12345678000195").unwrap(),
        MerchantProfile::new("Loja Teste", "SAO PAULO"),
    )
    .with_reference_label("PEDIDO-1")
    .build()
    .unwrap_err();

    let display_output = format!("{}", error);
    assert!(display_output.contains("Invalid reference label 'PEDIDO-1'"));
    assert!(display_output.contains("letters and digits"));
}

#[test]
fn test_non_ascii_formatting() {
    let error = pix_codec::encode_field(PayloadField::MerchantCity, "Maceió").unwrap_err();
    assert_eq!(
        format!("{}", error),
        "Field 60 contains non-ASCII character 'ó' at position 5"
    );
}
