use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

use crate::buffer::Buffer;

// Decodes whatever complete or partial groups survive the prefix scan.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// hex_encode renders each byte as two uppercase hex digits.
pub fn hex_encode(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// hex_decode decodes pairs of hex digits (either case).
///
/// Odd-length input decodes to nothing. Decoding stops at the first pair
/// holding a non-hex character; the output is truncated there.
pub fn hex_decode(text: &str) -> Buffer {
    let bytes = text.as_bytes();
    if bytes.len() % 2 != 0 {
        log::debug!("hex input has odd length {}", bytes.len());
        return Buffer::new();
    }

    let valid_pairs = bytes
        .chunks_exact(2)
        .take_while(|pair| pair.iter().all(u8::is_ascii_hexdigit))
        .count();
    if valid_pairs * 2 < bytes.len() {
        log::debug!("hex input truncated at offset {}", valid_pairs * 2);
    }

    match hex::decode(&bytes[..valid_pairs * 2]) {
        Ok(decoded) => Buffer::from(decoded),
        Err(e) => {
            log::debug!("hex decode failed: {}", e);
            Buffer::new()
        }
    }
}

/// base64_encode uses the standard alphabet with `=` padding and no wrapping.
pub fn base64_encode(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

/// base64_decode decodes up to the first `=` or non-alphabet character.
///
/// Complete 4-symbol groups yield 3 bytes; a trailing group of 2 or 3
/// symbols yields 1 or 2 bytes and a lone trailing symbol yields nothing.
/// Malformed input is never reported, it only shortens the result.
pub fn base64_decode(text: &str) -> Buffer {
    let bytes = text.as_bytes();
    let mut end = bytes
        .iter()
        .position(|c| !is_base64(*c))
        .unwrap_or(bytes.len());
    if end < bytes.len() && bytes[end] != b'=' {
        log::debug!("base64 input truncated at offset {}", end);
    }
    if end % 4 == 1 {
        end -= 1;
    }

    match LENIENT_BASE64.decode(&bytes[..end]) {
        Ok(decoded) => Buffer::from(decoded),
        Err(e) => {
            log::debug!("base64 decode failed: {}", e);
            Buffer::new()
        }
    }
}

fn is_base64(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'+' || c == b'/'
}
