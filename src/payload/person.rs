//! Person-tracking payload decoder.
//!
//! Person captures are read as 4-byte blocks. A fixed run of header blocks is
//! followed by 8-block person records:
//!
//! ```text
//! Debug3: FrameHeader1 FrameHeader2 LenFrame CurrentFrame TLV1 AlwaysZero TLV2 NumPeople | persons...
//! Debug2:                                                                 TLV2 NumPeople | persons...
//! ```

use super::{BLOCK_WIDTH, PERSON_FIELDS, PERSON_RECORD_WIDTH};
use crate::config::PersonLayout;
use crate::error::Result;
use crate::numeric::{binary_digits_to_uint, hex_byte_to_person_count, hex_to_f32_le, Decoded};
use crate::tokenizer::RawLine;

/// Names of the Debug3 header blocks preceding TLV2, in wire order.
pub const FRAME_BLOCK_NAMES: [&str; 6] = [
    "FrameHeader1",
    "FrameHeader2",
    "LenFrame",
    "CurrentFrame",
    "TLV1",
    "AlwaysZero",
];

/// Header blocks of a person-tracking frame, each as space-separated byte tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonHeader {
    /// Blocks before TLV2 (see [`FRAME_BLOCK_NAMES`]); empty for Debug2 captures
    pub frame_blocks: Vec<String>,
    pub tlv2: String,
    /// Raw personnel length block
    pub num_people_raw: String,
    /// Person count derived from the personnel length
    pub num_people: Decoded<u32>,
}

impl PersonHeader {
    /// First byte of TLV2, the form reported in tables.
    pub fn tlv2_type(&self) -> &str {
        self.tlv2.split_whitespace().next().unwrap_or("")
    }

    /// A Debug3 header block by name.
    pub fn frame_block(&self, name: &str) -> Option<&str> {
        let idx = FRAME_BLOCK_NAMES.iter().position(|n| *n == name)?;
        self.frame_blocks.get(idx).map(String::as_str)
    }
}

/// One tracked person.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    /// 1-based position within the frame
    pub index: usize,
    pub id: Decoded<u64>,
    pub q: Decoded<f32>,
    pub x: Decoded<f32>,
    pub y: Decoded<f32>,
    pub z: Decoded<f32>,
    pub vx: Decoded<f32>,
    pub vy: Decoded<f32>,
    pub vz: Decoded<f32>,
}

impl PersonRecord {
    fn from_blocks(index: usize, blocks: &[String]) -> Self {
        Self {
            index,
            id: binary_digits_to_uint(&blocks[0]),
            q: hex_to_f32_le(&blocks[1]),
            x: hex_to_f32_le(&blocks[2]),
            y: hex_to_f32_le(&blocks[3]),
            z: hex_to_f32_le(&blocks[4]),
            vx: hex_to_f32_le(&blocks[5]),
            vy: hex_to_f32_le(&blocks[6]),
            vz: hex_to_f32_le(&blocks[7]),
        }
    }

    /// Float fields in column order (`Q, X, Y, Z, Vx, Vy, Vz`).
    pub fn float_fields(&self) -> [(&'static str, &Decoded<f32>); 7] {
        [
            ("Q", &self.q),
            ("X", &self.x),
            ("Y", &self.y),
            ("Z", &self.z),
            ("Vx", &self.vx),
            ("Vy", &self.vy),
            ("Vz", &self.vz),
        ]
    }
}

/// Decodes a person-tracking line.
///
/// Only complete 32-byte records are decoded, and at most `max_persons` of
/// them; anything past that is ignored.
pub fn decode_persons(
    line: &RawLine,
    layout: PersonLayout,
    max_persons: usize,
) -> Result<(PersonHeader, Vec<PersonRecord>)> {
    let header_blocks = layout.header_blocks();
    line.ensure_len(header_blocks * BLOCK_WIDTH)?;

    let blocks: Vec<String> = line.groups(BLOCK_WIDTH).map(|g| g.join(" ")).collect();
    let (head, body) = blocks.split_at(header_blocks);

    let num_people_raw = head[header_blocks - 1].clone();
    let header = PersonHeader {
        frame_blocks: head[..header_blocks - 2].to_vec(),
        tlv2: head[header_blocks - 2].clone(),
        num_people: hex_byte_to_person_count(&num_people_raw),
        num_people_raw,
    };

    let complete = (line.len() - header_blocks * BLOCK_WIDTH) / PERSON_RECORD_WIDTH;
    let persons = body
        .chunks_exact(PERSON_FIELDS)
        .take(complete.min(max_persons))
        .enumerate()
        .map(|(i, record)| PersonRecord::from_blocks(i + 1, record))
        .collect();

    Ok((header, persons))
}
