//! Decoded frames and the per-line decode entry point.

use crate::config::{DecoderConfig, FrameMode, PersonLayout};
use crate::error::{CaptureError, Result};
use crate::header::{parse_header, FrameHeader};
use crate::payload::{
    decode_persons, decode_points, PersonHeader, PersonRecord, PointRecord, TERMINATOR,
};
use crate::tokenizer::tokenize;

/// Payload of a frame, tagged by capture mode.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBody {
    PointCloud {
        header: FrameHeader,
        points: Vec<PointRecord>,
        /// Whether the declared payload length fit the line
        length_consistent: bool,
    },
    Persons {
        header: PersonHeader,
        persons: Vec<PersonRecord>,
    },
}

/// One decoded capture line.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub timestamp: String,
    pub body: FrameBody,
}

impl Frame {
    /// Point records, if this is a point-cloud frame.
    pub fn points(&self) -> Option<&[PointRecord]> {
        match &self.body {
            FrameBody::PointCloud { points, .. } => Some(points),
            FrameBody::Persons { .. } => None,
        }
    }

    /// Person records, if this is a person-tracking frame.
    pub fn persons(&self) -> Option<&[PersonRecord]> {
        match &self.body {
            FrameBody::Persons { persons, .. } => Some(persons),
            FrameBody::PointCloud { .. } => None,
        }
    }

    pub fn mode(&self) -> FrameMode {
        match self.body {
            FrameBody::PointCloud { .. } => FrameMode::PointCloud,
            FrameBody::Persons { .. } => FrameMode::PersonTracking,
        }
    }

    /// Number of records in the payload.
    pub fn record_count(&self) -> usize {
        match &self.body {
            FrameBody::PointCloud { points, .. } => points.len(),
            FrameBody::Persons { persons, .. } => persons.len(),
        }
    }
}

/// Decodes one capture line.
///
/// Pure function of its inputs, so lines can be decoded in any order (or in
/// parallel) as long as results are reassembled in input order.
pub fn decode_line(line: &str, config: &DecoderConfig) -> Result<Frame> {
    let raw = tokenize(line)?;
    let timestamp = raw.timestamp.clone();

    let body = match config.mode {
        FrameMode::PointCloud => {
            let (header, payload) = parse_header(&raw)?;
            let length_consistent = header.is_consistent_with(payload.len());
            if !length_consistent {
                log::debug!(
                    "{}: declared payload length {} does not fit {} tokens",
                    raw.timestamp,
                    header.point_length_hex(),
                    payload.len()
                );
            }
            let points = decode_points(payload);
            FrameBody::PointCloud {
                header,
                points,
                length_consistent,
            }
        }
        FrameMode::PersonTracking => {
            let raw = match config.person_layout {
                PersonLayout::Debug3 => raw,
                PersonLayout::Debug2 => {
                    // Debug2 captures are read from the TLV2 sentinel onward
                    let start = raw.find_bytes(&TERMINATOR).ok_or_else(|| {
                        CaptureError::MissingHexSection {
                            timestamp: raw.timestamp.clone(),
                        }
                    })?;
                    raw.split_off_front(start)
                }
            };
            let (header, persons) =
                decode_persons(&raw, config.person_layout, config.max_persons)?;
            FrameBody::Persons { header, persons }
        }
    };

    Ok(Frame { timestamp, body })
}
