//! # Payee Keys - Pix Account Identifiers
//!
//! ## Purpose
//!
//! A payee key routes a Pix payment to one receiving account. Five key types
//! exist, each with its own normalization and validation rules:
//!
//! | Kind   | Normalized form                              |
//! |--------|----------------------------------------------|
//! | CPF    | 11 digits, mod-11 check digits verified      |
//! | CNPJ   | 14 digits, mod-11 check digits verified      |
//! | Email  | lower-case `local@domain.tld`, at most 77    |
//! | Phone  | `+` followed by 8-15 digits (E.164)          |
//! | Random | lower-case hyphenated UUID                   |
//!
//! A `PayeeKey` can only be obtained through validation, so holding one
//! guarantees the value is safe to encode.

use crate::common::errors::KeyError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const CPF_DIGITS: usize = 11;
const CNPJ_DIGITS: usize = 14;
const EMAIL_MAX_LEN: usize = 77;
const PHONE_MIN_DIGITS: usize = 8;
const PHONE_MAX_DIGITS: usize = 15;
const BRAZIL_COUNTRY_CODE: &str = "55";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9\-]+(\.[a-z0-9\-]+)*\.[a-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Type of a payee key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayeeKeyKind {
    Cpf,
    Cnpj,
    Email,
    Phone,
    Random,
}

impl PayeeKeyKind {
    /// All key kinds in display order
    pub const ALL: [PayeeKeyKind; 5] = [
        PayeeKeyKind::Cpf,
        PayeeKeyKind::Cnpj,
        PayeeKeyKind::Email,
        PayeeKeyKind::Phone,
        PayeeKeyKind::Random,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PayeeKeyKind::Cpf => "cpf",
            PayeeKeyKind::Cnpj => "cnpj",
            PayeeKeyKind::Email => "email",
            PayeeKeyKind::Phone => "phone",
            PayeeKeyKind::Random => "random",
        }
    }
}

impl fmt::Display for PayeeKeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PayeeKeyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PayeeKeyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown payee key kind '{}'", s))
    }
}

/// Validated, normalized payee key
///
/// Not `Deserialize`: keys are only obtained through [`PayeeKey::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PayeeKey {
    Cpf(String),
    Cnpj(String),
    Email(String),
    Phone(String),
    Random(String),
}

impl PayeeKey {
    /// Normalize and validate `raw` as a key of the given kind
    pub fn new(kind: PayeeKeyKind, raw: &str) -> Result<Self, KeyError> {
        match kind {
            PayeeKeyKind::Cpf => Self::cpf(raw),
            PayeeKeyKind::Cnpj => Self::cnpj(raw),
            PayeeKeyKind::Email => Self::email(raw),
            PayeeKeyKind::Phone => Self::phone(raw),
            PayeeKeyKind::Random => Self::random(raw),
        }
    }

    /// CPF key; accepts `529.982.247-25` or `52998224725`
    pub fn cpf(raw: &str) -> Result<Self, KeyError> {
        let digits = tax_id_digits(PayeeKeyKind::Cpf, raw, CPF_DIGITS, &['.', '-'])?;
        if !cpf_check_digits_valid(&digits) {
            return Err(KeyError::CheckDigitMismatch {
                kind: PayeeKeyKind::Cpf,
                input: raw.to_string(),
            });
        }
        Ok(PayeeKey::Cpf(digits))
    }

    /// CNPJ key; accepts `12.345.678/0001-95` or `12345678000195`
    pub fn cnpj(raw: &str) -> Result<Self, KeyError> {
        let digits = tax_id_digits(PayeeKeyKind::Cnpj, raw, CNPJ_DIGITS, &['.', '-', '/'])?;
        if !cnpj_check_digits_valid(&digits) {
            return Err(KeyError::CheckDigitMismatch {
                kind: PayeeKeyKind::Cnpj,
                input: raw.to_string(),
            });
        }
        Ok(PayeeKey::Cnpj(digits))
    }

    /// Email key, lower-cased
    pub fn email(raw: &str) -> Result<Self, KeyError> {
        let email = raw.trim().to_ascii_lowercase();

        if let Some(found) = email.chars().find(|c| !c.is_ascii()) {
            return Err(KeyError::InvalidCharacter {
                kind: PayeeKeyKind::Email,
                input: raw.to_string(),
                found,
            });
        }
        if email.len() > EMAIL_MAX_LEN {
            return Err(KeyError::malformed(
                PayeeKeyKind::Email,
                raw,
                format!("longer than {} characters", EMAIL_MAX_LEN),
            ));
        }
        if !EMAIL_PATTERN.is_match(&email) {
            return Err(KeyError::malformed(
                PayeeKeyKind::Email,
                raw,
                "not a local@domain address",
            ));
        }

        Ok(PayeeKey::Email(email))
    }

    /// Phone key in E.164 form
    ///
    /// Input without a leading `+` that has 10 or 11 digits is read as a
    /// Brazilian national number (area code + subscriber) and gets `+55`.
    pub fn phone(raw: &str) -> Result<Self, KeyError> {
        let trimmed = raw.trim();
        let (has_plus, rest) = match trimmed.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '(' | ')' | '-' | '.' => {}
                other => {
                    return Err(KeyError::InvalidCharacter {
                        kind: PayeeKeyKind::Phone,
                        input: raw.to_string(),
                        found: other,
                    })
                }
            }
        }

        if !has_plus && (digits.len() == 10 || digits.len() == 11) {
            digits.insert_str(0, BRAZIL_COUNTRY_CODE);
        }

        if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
            return Err(KeyError::malformed(
                PayeeKeyKind::Phone,
                raw,
                format!(
                    "expected {}-{} digits including country code, got {}",
                    PHONE_MIN_DIGITS,
                    PHONE_MAX_DIGITS,
                    digits.len()
                ),
            ));
        }

        Ok(PayeeKey::Phone(format!("+{}", digits)))
    }

    /// Random (EVP) key, a UUID in any standard textual form
    pub fn random(raw: &str) -> Result<Self, KeyError> {
        let uuid = Uuid::parse_str(raw.trim()).map_err(|e| {
            KeyError::malformed(PayeeKeyKind::Random, raw, format!("not a UUID ({})", e))
        })?;
        Ok(PayeeKey::Random(uuid.hyphenated().to_string()))
    }

    pub fn kind(&self) -> PayeeKeyKind {
        match self {
            PayeeKey::Cpf(_) => PayeeKeyKind::Cpf,
            PayeeKey::Cnpj(_) => PayeeKeyKind::Cnpj,
            PayeeKey::Email(_) => PayeeKeyKind::Email,
            PayeeKey::Phone(_) => PayeeKeyKind::Phone,
            PayeeKey::Random(_) => PayeeKeyKind::Random,
        }
    }

    /// Normalized key exactly as it is encoded
    pub fn as_str(&self) -> &str {
        match self {
            PayeeKey::Cpf(v)
            | PayeeKey::Cnpj(v)
            | PayeeKey::Email(v)
            | PayeeKey::Phone(v)
            | PayeeKey::Random(v) => v,
        }
    }
}

impl fmt::Display for PayeeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.as_str())
    }
}

/// Strip punctuation from a CPF/CNPJ and check the digit count
fn tax_id_digits(
    kind: PayeeKeyKind,
    raw: &str,
    expected: usize,
    separators: &[char],
) -> Result<String, KeyError> {
    let mut digits = String::with_capacity(expected);
    for c in raw.trim().chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !(c.is_whitespace() || separators.contains(&c)) {
            return Err(KeyError::InvalidCharacter {
                kind,
                input: raw.to_string(),
                found: c,
            });
        }
    }

    if digits.len() != expected {
        return Err(KeyError::WrongLength {
            kind,
            input: raw.to_string(),
            expected,
            got: digits.len(),
        });
    }

    Ok(digits)
}

fn digit_values(digits: &str) -> Vec<u32> {
    digits.bytes().map(|b| u32::from(b - b'0')).collect()
}

fn all_same(values: &[u32]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

fn cpf_check_digits_valid(digits: &str) -> bool {
    let n = digit_values(digits);
    if all_same(&n) {
        return false;
    }

    [9usize, 10].iter().all(|&len| {
        let sum: u32 = n[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        (sum * 10) % 11 % 10 == n[len]
    })
}

fn cnpj_check_digits_valid(digits: &str) -> bool {
    const WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    let n = digit_values(digits);
    if all_same(&n) {
        return false;
    }

    [12usize, 13].iter().all(|&len| {
        let weights = &WEIGHTS[WEIGHTS.len() - len..];
        let sum: u32 = n[..len].iter().zip(weights).map(|(d, w)| d * w).sum();
        let remainder = sum % 11;
        let expected = if remainder < 2 { 0 } else { 11 - remainder };
        expected == n[len]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_normalization() {
        let key = PayeeKey::cpf("529.982.247-25").unwrap();
        assert_eq!(key.as_str(), "52998224725");
        assert_eq!(key.kind(), PayeeKeyKind::Cpf);
    }

    #[test]
    fn test_cpf_one_digit_short() {
        let err = PayeeKey::cpf("5299822472").unwrap_err();
        assert!(matches!(
            err,
            KeyError::WrongLength { expected: 11, got: 10, .. }
        ));
    }

    #[test]
    fn test_cpf_check_digit() {
        assert!(matches!(
            PayeeKey::cpf("52998224724"),
            Err(KeyError::CheckDigitMismatch { .. })
        ));
        assert!(matches!(
            PayeeKey::cpf("11111111111"),
            Err(KeyError::CheckDigitMismatch { .. })
        ));
    }

    #[test]
    fn test_cnpj_normalization() {
        let key = PayeeKey::cnpj("12.345.678/0001-95").unwrap();
        assert_eq!(key.as_str(), "12345678000195");
        assert!(PayeeKey::cnpj("11222333000181").is_ok());
    }

    #[test]
    fn test_cnpj_rejections() {
        assert!(matches!(
            PayeeKey::cnpj("12345678000196"),
            Err(KeyError::CheckDigitMismatch { .. })
        ));
        assert!(matches!(
            PayeeKey::cnpj("1234567800019"),
            Err(KeyError::WrongLength { .. })
        ));
        assert!(matches!(
            PayeeKey::cnpj("12345678000a95"),
            Err(KeyError::InvalidCharacter { found: 'a', .. })
        ));
    }

    #[test]
    fn test_email() {
        let key = PayeeKey::email("  Loja@Exemplo.com.br ").unwrap();
        assert_eq!(key.as_str(), "loja@exemplo.com.br");

        assert!(PayeeKey::email("no-at-sign.com").is_err());
        assert!(PayeeKey::email("a@b").is_err());
        assert!(PayeeKey::email("two@@example.com").is_err());
        assert!(PayeeKey::email("joão@example.com").is_err());

        let long = format!("{}@example.com", "a".repeat(70));
        assert!(matches!(
            PayeeKey::email(&long),
            Err(KeyError::Malformed { .. })
        ));
    }

    #[test]
    fn test_phone() {
        assert_eq!(
            PayeeKey::phone("+55 (61) 91234-5678").unwrap().as_str(),
            "+5561912345678"
        );
        // National number gets the Brazil country code
        assert_eq!(
            PayeeKey::phone("(61) 91234-5678").unwrap().as_str(),
            "+5561912345678"
        );
        assert_eq!(PayeeKey::phone("+14155552671").unwrap().as_str(), "+14155552671");

        assert!(PayeeKey::phone("+1234").is_err());
        assert!(PayeeKey::phone("+1234567890123456").is_err());
        assert!(matches!(
            PayeeKey::phone("+55 61 9x234"),
            Err(KeyError::InvalidCharacter { found: 'x', .. })
        ));
    }

    #[test]
    fn test_random_key() {
        let key = PayeeKey::random("123E4567-E89B-12D3-A456-426614174000").unwrap();
        assert_eq!(key.as_str(), "123e4567-e89b-12d3-a456-426614174000");

        let simple = PayeeKey::random("123e4567e89b12d3a456426614174000").unwrap();
        assert_eq!(simple, key);

        assert!(PayeeKey::random("not-a-uuid").is_err());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("CNPJ".parse::<PayeeKeyKind>().unwrap(), PayeeKeyKind::Cnpj);
        assert_eq!("random".parse::<PayeeKeyKind>().unwrap(), PayeeKeyKind::Random);
        assert!("iban".parse::<PayeeKeyKind>().is_err());
    }

    #[test]
    fn test_new_dispatches_by_kind() {
        for kind in PayeeKeyKind::ALL {
            let raw = match kind {
                PayeeKeyKind::Cpf => "52998224725",
                PayeeKeyKind::Cnpj => "12345678000195",
                PayeeKeyKind::Email => "pix@example.com",
                PayeeKeyKind::Phone => "+5561912345678",
                PayeeKeyKind::Random => "123e4567-e89b-12d3-a456-426614174000",
            };
            assert_eq!(PayeeKey::new(kind, raw).unwrap().kind(), kind);
        }
    }
}
