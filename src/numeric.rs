//! Lenient numeric decoders for hex byte tokens.
//!
//! Every decoder returns a [`Decoded`] value: either the decoded number or the
//! original input text, untouched. Malformed input never raises. The caller
//! decides what an unresolved field means for its output.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::{Serialize, Serializer};
use std::fmt;

/// Size of a personnel record in bytes, used to turn a byte length into a count.
pub const PERSON_BYTES: u32 = 32;

/// Result of a lenient decode.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// Successfully decoded value
    Value(T),
    /// Original input, passed through because it could not be decoded
    Raw(String),
}

impl<T> Decoded<T> {
    /// Returns the decoded value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Decoded::Value(v) => Some(v),
            Decoded::Raw(_) => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Decoded::Raw(_))
    }
}

impl<T: Copy> Decoded<T> {
    /// Returns a copy of the decoded value, if any.
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

impl<T: fmt::Display> fmt::Display for Decoded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoded::Value(v) => write!(f, "{}", v),
            Decoded::Raw(s) => f.write_str(s),
        }
    }
}

impl<T: Serialize> Serialize for Decoded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Decoded::Value(v) => v.serialize(serializer),
            Decoded::Raw(s) => serializer.serialize_str(s),
        }
    }
}

/// Parses a single two-digit hex token.
pub fn parse_byte(token: &str) -> Option<u8> {
    let mut out = [0u8; 1];
    hex::decode_to_slice(token, &mut out).ok()?;
    Some(out[0])
}

/// Concatenates byte tokens into one hex string (`["01", "44"]` -> `"0144"`).
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens.iter().map(|t| t.as_ref()).collect()
}

/// Decodes exactly `N` bytes from hex text, ignoring whitespace between bytes.
fn decode_exact<const N: usize>(text: &str) -> Option<[u8; N]> {
    let compact: String = text.split_whitespace().collect();
    let mut out = [0u8; N];
    hex::decode_to_slice(compact, &mut out).ok()?;
    Some(out)
}

/// Interprets 4 hex bytes as an IEEE754 binary32 in little-endian order.
pub fn hex_to_f32_le(text: &str) -> Decoded<f32> {
    match decode_exact::<4>(text) {
        Some(bytes) => Decoded::Value(LittleEndian::read_f32(&bytes)),
        None => Decoded::Raw(text.to_string()),
    }
}

/// Interprets 4 hex bytes as an unsigned 32-bit integer in big-endian order.
pub fn hex_to_u32_be(text: &str) -> Decoded<u32> {
    match decode_exact::<4>(text) {
        Some(bytes) => Decoded::Value(BigEndian::read_u32(&bytes)),
        None => Decoded::Raw(text.to_string()),
    }
}

/// Derives a person count from the first byte of a personnel length field.
///
/// The byte holds the personnel block length; each person takes 32 bytes.
pub fn hex_byte_to_person_count(text: &str) -> Decoded<u32> {
    let compact: String = text.split_whitespace().collect();
    let first = compact.get(..2).and_then(parse_byte);
    match first {
        Some(byte) => Decoded::Value(u32::from(byte) / PERSON_BYTES),
        None => Decoded::Raw(text.to_string()),
    }
}

/// Parses a string of ASCII `0`/`1` digits as an unsigned base-2 integer.
///
/// Whitespace anywhere in the input is ignored, so a 4-byte block such as
/// `"01 00 00 00"` reads as the digit string `01000000`.
pub fn binary_digits_to_uint(text: &str) -> Decoded<u64> {
    let digits: String = text.split_whitespace().collect();
    if digits.is_empty() || !digits.bytes().all(|b| b == b'0' || b == b'1') {
        return Decoded::Raw(text.to_string());
    }
    match u64::from_str_radix(&digits, 2) {
        Ok(v) => Decoded::Value(v),
        Err(_) => Decoded::Raw(text.to_string()),
    }
}

/// Rounds to two decimal places for output.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
