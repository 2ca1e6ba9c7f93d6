//! Capture-level statistics for the `info` command.

use crate::frame::{Frame, FrameBody};
use crate::Capture;

/// Summary of a decoded capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSummary {
    pub lines_read: usize,
    pub frames: usize,
    pub skipped: usize,
    pub first_timestamp: Option<String>,
    pub last_timestamp: Option<String>,
    /// Points or persons, depending on the capture mode
    pub total_records: usize,
    pub min_records: Option<usize>,
    pub max_records: Option<usize>,
    /// Point frames whose declared payload length did not fit the line
    pub length_mismatches: usize,
    /// Records with at least one field left as raw text
    pub records_with_raw_fields: usize,
}

impl CaptureSummary {
    pub fn from_capture(capture: &Capture) -> Self {
        let frames = &capture.frames;
        let counts = frames.iter().map(Frame::record_count);

        let length_mismatches = frames
            .iter()
            .filter(|f| {
                matches!(
                    f.body,
                    FrameBody::PointCloud {
                        length_consistent: false,
                        ..
                    }
                )
            })
            .count();

        Self {
            lines_read: capture.report.lines_read,
            frames: frames.len(),
            skipped: capture.report.skipped.len(),
            first_timestamp: frames.first().map(|f| f.timestamp.clone()),
            last_timestamp: frames.last().map(|f| f.timestamp.clone()),
            total_records: counts.clone().sum(),
            min_records: counts.clone().min(),
            max_records: counts.max(),
            length_mismatches,
            records_with_raw_fields: frames.iter().map(raw_records).sum(),
        }
    }
}

fn raw_records(frame: &Frame) -> usize {
    match &frame.body {
        FrameBody::PointCloud { points, .. } => points
            .iter()
            .filter(|p| p.x.is_raw() || p.y.is_raw() || p.z.is_raw())
            .count(),
        FrameBody::Persons { persons, .. } => persons
            .iter()
            .filter(|p| p.id.is_raw() || p.float_fields().iter().any(|(_, f)| f.is_raw()))
            .count(),
    }
}
