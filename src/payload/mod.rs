//! Variable-length payload decoders.
//!
//! Both decoders step through the payload in fixed-width records and never
//! revisit a token: the offset only moves forward, one record width at a time.

pub mod person;
pub mod point;

pub use person::{decode_persons, PersonHeader, PersonRecord};
pub use point::{decode_points, PointRecord};

/// End-of-point-list marker; also the start of the TLV2 block.
pub const TERMINATOR: [u8; 4] = [0x02, 0x00, 0x00, 0x00];

/// Byte tokens per point record.
pub const POINT_RECORD_WIDTH: usize = 25;

/// Bytes per field block in person captures.
pub const BLOCK_WIDTH: usize = 4;

/// Field blocks per person record (`id, q, x, y, z, vx, vy, vz`).
pub const PERSON_FIELDS: usize = 8;

/// Byte tokens per person record.
pub const PERSON_RECORD_WIDTH: usize = PERSON_FIELDS * BLOCK_WIDTH;
