//! Hex text form of WKB buffers, as used by hex EWKB input and output.

use crate::error::{GeomError, Result};

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decode a hex string of even length into bytes.
///
/// # Example
///
/// ```
/// use geomeasure_core::wkb::decode_hex;
///
/// assert_eq!(decode_hex("01ff").unwrap(), vec![0x01, 0xff]);
/// assert!(decode_hex("0").is_err());
/// assert!(decode_hex("0g").is_err());
/// ```
pub fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    let raw = hex.as_bytes();
    if raw.len() % 2 != 0 {
        return Err(GeomError::InvalidHex(format!(
            "odd length {} is not a whole number of bytes",
            raw.len()
        )));
    }
    raw.chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| match (nibble(pair[0]), nibble(pair[1])) {
            (Some(hi), Some(lo)) => Ok(hi << 4 | lo),
            _ => Err(GeomError::InvalidHex(format!(
                "invalid hex digit at offset {}",
                i * 2
            ))),
        })
        .collect()
}

/// Upper-case hex rendering of `bytes`.
pub fn encode_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(DIGITS[usize::from(b >> 4)]));
        out.push(char::from(DIGITS[usize::from(b & 0x0F)]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_case_digits() {
        assert_eq!(decode_hex("aBcD").unwrap(), vec![0xAB, 0xCD]);
        assert_eq!(encode_hex(&[0xAB, 0x01]), "AB01");
    }

    #[test]
    fn empty_string_is_empty_buffer() {
        assert!(decode_hex("").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(decode_hex("é0").is_err());
    }
}
