//! Decoder for ASCII-hex serial captures of an mmWave radar's debug output.
//!
//! Each capture line holds one radar frame as space-separated hex bytes behind
//! a `[HH:MM:SS.mmm]` timestamp. Two payload shapes are supported:
//!
//! - **Point cloud**: a 24-byte header followed by 25-byte point records,
//!   ending at the `02 00 00 00` sentinel or at the end of the line
//! - **Person tracking**: 4-byte header blocks followed by 32-byte person
//!   records (`id, q, x, y, z, vx, vy, vz`)
//!
//! # Example
//!
//! ```no_run
//! use mmwave_capture::{aggregate, CaptureParser, DecoderConfig};
//!
//! let capture = CaptureParser::new(DecoderConfig::default()).from_file("capture.txt")?;
//! for avg in aggregate::average_frames(&capture.frames, 10.0) {
//!     println!("{} {:?} {:?} {:?}", avg.timestamp, avg.avg_x, avg.avg_y, avg.avg_z);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Error handling
//!
//! Decoding is lenient. A line that cannot be framed (missing timestamp, too
//! few bytes) is skipped and recorded in the [`DecodeReport`]; a field that
//! cannot be decoded keeps its raw text as [`numeric::Decoded::Raw`]. Only I/O
//! and export failures surface as errors.

pub mod aggregate;
pub mod builders;
pub mod config;
pub mod converter;
pub mod error;
pub mod export;
pub mod frame;
pub mod header;
pub mod numeric;
pub mod payload;
pub mod summary;
pub mod tokenizer;
pub mod types;

pub use config::{DecoderConfig, FrameMode, PersonLayout};
pub use error::{CaptureError, Result};
pub use frame::{decode_line, Frame, FrameBody};
pub use polars::prelude::DataFrame;

use std::fs::File;
use std::path::Path;

/// A line that was dropped during decoding.
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number in the input
    pub line_number: usize,
    pub reason: CaptureError,
}

/// Bookkeeping for a decode run.
#[derive(Debug, Default)]
pub struct DecodeReport {
    /// Non-blank lines seen
    pub lines_read: usize,
    pub skipped: Vec<SkippedLine>,
}

/// Frames decoded from one capture, in input order.
#[derive(Debug, Default)]
pub struct Capture {
    pub frames: Vec<Frame>,
    pub report: DecodeReport,
}

/// Main entry point for decoding capture files.
#[derive(Debug, Clone, Default)]
pub struct CaptureParser {
    config: DecoderConfig,
}

impl CaptureParser {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes a sequence of lines. Blank lines are ignored; structurally
    /// broken lines are logged and reported, never fatal.
    pub fn decode_lines<'a, I>(&self, lines: I) -> Capture
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut capture = Capture::default();

        for (i, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            capture.report.lines_read += 1;

            match decode_line(line, &self.config) {
                Ok(frame) => capture.frames.push(frame),
                Err(reason) => {
                    log::warn!(
                        "Skipping line {} ({}): {}",
                        i + 1,
                        reason.timestamp().unwrap_or("no timestamp"),
                        reason
                    );
                    capture.report.skipped.push(SkippedLine {
                        line_number: i + 1,
                        reason,
                    });
                }
            }
        }

        log::info!(
            "Decoded {} frames, skipped {} of {} lines",
            capture.frames.len(),
            capture.report.skipped.len(),
            capture.report.lines_read
        );
        capture
    }

    /// Decodes capture text held in memory.
    pub fn decode_str(&self, text: &str) -> Capture {
        self.decode_lines(text.lines())
    }

    /// Decodes raw capture bytes. Non-UTF-8 bytes (terminal prefixes) are
    /// replaced, which never touches the hex section.
    pub fn decode_bytes(&self, data: &[u8]) -> Capture {
        self.decode_str(&String::from_utf8_lossy(data))
    }

    /// Decodes a capture file from disk using memory mapping.
    pub fn from_file<P: AsRef<Path>>(&self, path: P) -> Result<Capture> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Capture::default());
        }
        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        Ok(self.decode_bytes(&mmap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "01 02 03 04 05 06 07 08 5F 02 00 00 38 00 00 00 01 00 00 00 3F 02 00 00";

    #[test]
    fn test_decode_str_skips_and_orders() {
        let text = format!(
            "[10:00:00.000]{h}\n   \n[10:00:00.100]01 02\nno timestamp here\n[10:00:00.200]{h}\n",
            h = HEADER
        );
        let capture = CaptureParser::default().decode_str(&text);

        assert_eq!(capture.report.lines_read, 4);
        let times: Vec<_> = capture.frames.iter().map(|f| f.timestamp.as_str()).collect();
        assert_eq!(times, vec!["10:00:00.000", "10:00:00.200"]);

        let skipped: Vec<_> = capture.report.skipped.iter().map(|s| s.line_number).collect();
        assert_eq!(skipped, vec![3, 4]);
        assert!(capture.report.skipped.iter().all(|s| s.reason.is_structural()));
    }

    #[test]
    fn test_decode_bytes_lossy_prefix() {
        let mut data = b"[10:00:00.000]IN\xa1\xfb\xa1\xf4".to_vec();
        data.extend_from_slice(HEADER.as_bytes());
        let capture = CaptureParser::default().decode_bytes(&data);
        assert_eq!(capture.frames.len(), 1);
        match &capture.frames[0].body {
            FrameBody::PointCloud { header, .. } => assert_eq!(header.magic[0], "01"),
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_from_file_missing() {
        let result = CaptureParser::default().from_file("/nonexistent/capture.txt");
        assert!(matches!(result, Err(CaptureError::Io(_))));
    }
}
