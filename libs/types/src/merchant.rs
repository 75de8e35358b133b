//! Merchant display data
//!
//! The payload carries the merchant name and city as plain ASCII with hard
//! length caps (25 and 15 characters). Longer values are truncated, never
//! rejected:
//!
//! 1. Latin diacritics are folded to their base letter (`São` → `Sao`),
//!    remaining non-ASCII characters are dropped;
//! 2. whitespace runs collapse to a single space and the ends are trimmed;
//! 3. the result is cut to the first N characters.

use serde::Serialize;
use tracing::debug;

/// Merchant name and city as they appear in the payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MerchantProfile {
    name: String,
    city: String,
}

impl MerchantProfile {
    /// Longest merchant name the payment network accepts
    pub const NAME_MAX_LEN: usize = 25;

    /// Longest merchant city the payment network accepts
    pub const CITY_MAX_LEN: usize = 15;

    /// Sanitize and truncate name and city
    pub fn new(name: &str, city: &str) -> Self {
        Self {
            name: sanitize_field("merchant name", name, Self::NAME_MAX_LEN),
            city: sanitize_field("merchant city", city, Self::CITY_MAX_LEN),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

fn sanitize_field(label: &str, raw: &str, max_len: usize) -> String {
    let folded = fold_to_ascii(raw);
    let truncated = truncate_chars(&folded, max_len);
    let (before, after) = (folded.chars().count(), truncated.chars().count());
    if after < before {
        debug!(
            "Truncated {} from {} to {} characters: {:?}",
            label, before, after, truncated
        );
    }
    truncated
}

/// Re-encode free text as printable ASCII
///
/// Diacritics common in Portuguese and other Latin scripts map to their base
/// letter. Characters with no mapping are dropped. Whitespace runs collapse
/// to one space and leading/trailing whitespace is removed.
pub fn fold_to_ascii(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }

        let folded = match c {
            ' '..='~' => Some(c),
            'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => Some('a'),
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => Some('A'),
            'é' | 'è' | 'ê' | 'ë' => Some('e'),
            'É' | 'È' | 'Ê' | 'Ë' => Some('E'),
            'í' | 'ì' | 'î' | 'ï' => Some('i'),
            'Í' | 'Ì' | 'Î' | 'Ï' => Some('I'),
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => Some('o'),
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => Some('O'),
            'ú' | 'ù' | 'û' | 'ü' => Some('u'),
            'Ú' | 'Ù' | 'Û' | 'Ü' => Some('U'),
            'ç' => Some('c'),
            'Ç' => Some('C'),
            'ñ' => Some('n'),
            'Ñ' => Some('N'),
            _ => None,
        };

        if let Some(ascii) = folded {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ascii);
        }
    }

    out
}

/// First `max_chars` characters of `value`, cut exactly at the limit
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => value[..cut].to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_values_unchanged() {
        let merchant = MerchantProfile::new("Loja Teste", "SAO PAULO");
        assert_eq!(merchant.name(), "Loja Teste");
        assert_eq!(merchant.city(), "SAO PAULO");
    }

    #[test]
    fn test_name_truncated_to_25() {
        let name = "ABCDEFGHIJ".repeat(4);
        let merchant = MerchantProfile::new(&name, "RIO");
        assert_eq!(merchant.name(), &name[..25]);
        assert_eq!(merchant.name().chars().count(), 25);
    }

    #[test]
    fn test_city_truncated_to_15() {
        let merchant = MerchantProfile::new("Loja", "ABCDEFGHIJKLMNOPQRST");
        assert_eq!(merchant.city(), "ABCDEFGHIJKLMNO");
    }

    #[test]
    fn test_diacritics_folded() {
        let merchant = MerchantProfile::new("Padaria São João", "São Paulo");
        assert_eq!(merchant.name(), "Padaria Sao Joao");
        assert_eq!(merchant.city(), "Sao Paulo");
        assert_eq!(fold_to_ascii("Açaí & Cia"), "Acai & Cia");
    }

    #[test]
    fn test_unmapped_characters_dropped() {
        assert_eq!(fold_to_ascii("Café ☕ Bar"), "Cafe Bar");
        assert_eq!(fold_to_ascii("東京"), "");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(fold_to_ascii("  Loja \t\n  Teste  "), "Loja Teste");
    }

    #[test]
    fn test_truncation_keeps_space_at_limit() {
        // The 10th character is the space after "Paulo"
        assert_eq!(truncate_chars("Sao Paulo Centro Sul", 10), "Sao Paulo ");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
    }

    #[test]
    fn test_space_on_boundary_keeps_full_length() {
        let merchant = MerchantProfile::new(
            "Restaurante do Joao Bom Demais Ltda Cent",
            "Rio de Janeiro Sul Leste",
        );
        assert_eq!(merchant.name(), "Restaurante do Joao Bom D");
        assert_eq!(merchant.city(), "Rio de Janeiro ");
        assert_eq!(merchant.name().chars().count(), MerchantProfile::NAME_MAX_LEN);
        assert_eq!(merchant.city().chars().count(), MerchantProfile::CITY_MAX_LEN);
    }
}
