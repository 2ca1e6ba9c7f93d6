//! Point-cloud payload decoder.

use super::{POINT_RECORD_WIDTH, TERMINATOR};
use crate::numeric::{hex_to_f32_le, join_tokens, Decoded};
use crate::tokenizer::tokens_equal;

// Field layout inside one 25-byte record
const X: std::ops::Range<usize> = 0..4;
const Y: std::ops::Range<usize> = 4..8;
const Z: std::ops::Range<usize> = 8..12;
const V: usize = 12;
const SNR: std::ops::Range<usize> = 13..17;
const POW: std::ops::Range<usize> = 17..21;
const DPK: std::ops::Range<usize> = 21..25;

/// One detected reflection.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    /// 1-based position within the frame
    pub index: usize,
    /// Captured text of the x, y and z bytes, as joined tokens
    pub xyz_hex: [String; 3],
    pub x: Decoded<f32>,
    pub y: Decoded<f32>,
    pub z: Decoded<f32>,
    /// Raw byte token
    pub v: String,
    /// Raw concatenated hex; numeric meaning is left to downstream consumers
    pub snr: String,
    pub pow: String,
    pub dpk: String,
}

impl PointRecord {
    fn from_tokens(index: usize, record: &[String]) -> Self {
        let xyz_hex = [
            join_tokens(&record[X]),
            join_tokens(&record[Y]),
            join_tokens(&record[Z]),
        ];
        Self {
            index,
            x: hex_to_f32_le(&xyz_hex[0]),
            y: hex_to_f32_le(&xyz_hex[1]),
            z: hex_to_f32_le(&xyz_hex[2]),
            xyz_hex,
            v: record[V].clone(),
            snr: join_tokens(&record[SNR]),
            pow: join_tokens(&record[POW]),
            dpk: join_tokens(&record[DPK]),
        }
    }

    /// All three coordinates, when every one of them decoded.
    pub fn position(&self) -> Option<[f32; 3]> {
        Some([self.x.get()?, self.y.get()?, self.z.get()?])
    }
}

/// Decodes point records from the tokens following the header.
///
/// Stops at the terminator sentinel or when fewer than a full record remain;
/// a truncated tail is dropped silently.
pub fn decode_points(payload: &[String]) -> Vec<PointRecord> {
    let mut points = Vec::with_capacity(payload.len() / POINT_RECORD_WIDTH);
    let mut offset = 0;

    while offset < payload.len() {
        let rest = &payload[offset..];
        if tokens_equal(rest, &TERMINATOR) {
            break;
        }
        if rest.len() < POINT_RECORD_WIDTH {
            break;
        }

        points.push(PointRecord::from_tokens(
            points.len() + 1,
            &rest[..POINT_RECORD_WIDTH],
        ));
        offset += POINT_RECORD_WIDTH;
    }

    points
}
