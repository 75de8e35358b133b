//! CRC16/CCITT-FALSE Checksum
//!
//! Polynomial 0x1021, initial register 0xFFFF, bits processed MSB first,
//! no input/output reflection, no final XOR. The payload checksum covers
//! everything up to and including the `6304` prefix of the CRC field and is
//! rendered as four uppercase hex digits.

use crate::constants::{CRC_FIELD_PREFIX, CRC_VALUE_LEN};

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// Lookup table for byte-at-a-time processing, built at compile time
static CRC16_TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut register = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            register = if register & 0x8000 != 0 {
                (register << 1) ^ POLYNOMIAL
            } else {
                register << 1
            };
            bit += 1;
        }
        table[i] = register;
        i += 1;
    }
    table
}

/// Calculate the CRC16 of a text's bytes
pub fn compute_crc16(text: &str) -> u16 {
    let mut hasher = Crc16::new();
    hasher.update(text.as_bytes());
    hasher.finalize()
}

/// Bit-at-a-time reference implementation
///
/// Same result as [`compute_crc16`]; kept as the readable definition the
/// table is checked against.
pub fn compute_crc16_bitwise(data: &[u8]) -> u16 {
    let mut register = INITIAL;
    for &byte in data {
        for bit in (0..8).rev() {
            let input_bit = (byte >> bit) & 1 == 1;
            let top_bit = register & 0x8000 != 0;
            register <<= 1;
            if input_bit ^ top_bit {
                register ^= POLYNOMIAL;
            }
        }
    }
    register
}

/// Render a checksum as 4 uppercase, zero-padded hex digits
pub fn format_crc16(crc: u16) -> String {
    format!("{:04X}", crc)
}

/// Check the trailing CRC of a payload produced by this crate
///
/// Returns false when the payload does not end in `6304` + 4 hex digits or
/// when the digits differ from the recomputed checksum.
pub fn checksum_matches(payload: &str) -> bool {
    if payload.len() < CRC_FIELD_PREFIX.len() + CRC_VALUE_LEN || !payload.is_ascii() {
        return false;
    }

    let (checked, declared) = payload.split_at(payload.len() - CRC_VALUE_LEN);
    if !checked.ends_with(CRC_FIELD_PREFIX) {
        return false;
    }

    match u16::from_str_radix(declared, 16) {
        Ok(expected) => {
            declared.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
                && compute_crc16(checked) == expected
        }
        Err(_) => false,
    }
}

/// Streaming CRC16 calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16 {
    register: u16,
}

impl Crc16 {
    pub fn new() -> Self {
        Self { register: INITIAL }
    }

    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            let index = ((self.register >> 8) as u8 ^ byte) as usize;
            self.register = (self.register << 8) ^ CRC16_TABLE[index];
        }
    }

    pub fn finalize(self) -> u16 {
        self.register
    }

    pub fn reset(&mut self) {
        self.register = INITIAL;
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}
