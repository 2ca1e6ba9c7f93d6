//! Fixed-position header of a point-cloud frame.
//!
//! ```text
//! offset  0..8   magic block
//! offset  8..12  frame counter block
//! offset 12..16  (unused)
//! offset 16..20  TLV1 identifier
//! offset 20..24  payload length, big-endian
//! offset 24..    point payload
//! ```

use crate::error::Result;
use crate::numeric::{hex_to_u32_be, join_tokens, Decoded};
use crate::tokenizer::RawLine;
use serde::Serialize;
use std::ops::Range;

/// Tokens consumed by the point-cloud header.
pub const HEADER_TOKENS: usize = 24;

const MAGIC: Range<usize> = 0..8;
const FRAME_COUNTER: Range<usize> = 8..12;
const TLV1: Range<usize> = 16..20;
const PAYLOAD_LENGTH: Range<usize> = 20..24;

/// Header of a point-cloud frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameHeader {
    pub magic: Vec<String>,
    pub frame_counter: Vec<String>,
    /// Four identifier bytes, concatenated
    pub tlv1: String,
    /// Declared payload length; raw text if the field is not valid hex
    pub payload_length: Decoded<u32>,
}

impl FrameHeader {
    /// Payload length as eight uppercase hex digits (the `PointL` field).
    pub fn point_length_hex(&self) -> String {
        match &self.payload_length {
            Decoded::Value(v) => format!("{:08X}", v),
            Decoded::Raw(s) => s.clone(),
        }
    }

    /// True when the declared length fits the tokens that follow the header.
    ///
    /// Informational only: frames that fail this check are still decoded.
    pub fn is_consistent_with(&self, payload_tokens: usize) -> bool {
        match self.payload_length {
            Decoded::Value(len) => len as usize <= payload_tokens,
            Decoded::Raw(_) => false,
        }
    }
}

/// Parses the header and returns it together with the payload tokens.
pub fn parse_header(line: &RawLine) -> Result<(FrameHeader, &[String])> {
    line.ensure_len(HEADER_TOKENS)?;
    let tokens = &line.tokens;

    let header = FrameHeader {
        magic: tokens[MAGIC].to_vec(),
        frame_counter: tokens[FRAME_COUNTER].to_vec(),
        tlv1: join_tokens(&tokens[TLV1]),
        payload_length: hex_to_u32_be(&join_tokens(&tokens[PAYLOAD_LENGTH])),
    };

    Ok((header, &tokens[HEADER_TOKENS..]))
}
