//! Error types for the capture decoder.

use thiserror::Error;

/// Result type alias for capture decoding operations.
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors that can occur while decoding a radar capture.
///
/// Line-level variants ([`CaptureError::is_structural`]) drop a single frame and
/// never stop a run. Everything else is a resource-level failure.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Fewer byte tokens than the fixed header needs
    #[error("Line too short at {timestamp}: {found} tokens, need at least {required}")]
    TooShort {
        timestamp: String,
        found: usize,
        required: usize,
    },

    /// No `[HH:MM:SS.mmm]` bracket pair at the start of the line
    #[error("Missing timestamp bracket")]
    MissingBracket,

    /// Bracket present but its contents are not a 12 character timestamp
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// Nothing decodable after the timestamp (or no TLV2 anchor in Debug2 captures)
    #[error("Missing hex section at {timestamp}")]
    MissingHexSection { timestamp: String },

    /// I/O error occurred while reading the capture or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error during DataFrame construction or export
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unusable request (e.g. table export of the wrong frame mode)
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl CaptureError {
    /// Returns true for per-line conditions that skip one frame.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CaptureError::TooShort { .. }
                | CaptureError::MissingBracket
                | CaptureError::MalformedTimestamp(_)
                | CaptureError::MissingHexSection { .. }
        )
    }

    /// Timestamp of the offending line, when it could be recovered.
    pub fn timestamp(&self) -> Option<&str> {
        match self {
            CaptureError::TooShort { timestamp, .. }
            | CaptureError::MissingHexSection { timestamp } => Some(timestamp),
            _ => None,
        }
    }
}
