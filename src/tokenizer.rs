//! Splits a captured serial line into a timestamp and byte tokens.
//!
//! Input lines look like `[HH:MM:SS.mmm]<prefix>01 02 03 ...`. The terminal
//! software that records the capture may glue a few non-hex bytes onto the
//! first token (`IN¡û¡ô01`); those are stripped so that the token sequence starts
//! at the first byte of the frame.

use crate::error::{CaptureError, Result};
use crate::numeric::parse_byte;

/// Length of the `HH:MM:SS.mmm` timestamp.
pub const TIMESTAMP_LEN: usize = 12;

/// One tokenized capture line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub timestamp: String,
    pub tokens: Vec<String>,
}

/// Tokenizes a single capture line.
pub fn tokenize(line: &str) -> Result<RawLine> {
    let line = line.trim_start_matches('\u{feff}').trim();
    let rest = line.strip_prefix('[').ok_or(CaptureError::MissingBracket)?;
    let close = rest.find(']').ok_or(CaptureError::MissingBracket)?;

    let timestamp = &rest[..close];
    if timestamp.chars().count() != TIMESTAMP_LEN {
        return Err(CaptureError::MalformedTimestamp(timestamp.to_string()));
    }

    let tokens = split_hex_section(&rest[close + 1..]);
    if tokens.is_empty() {
        return Err(CaptureError::MissingHexSection {
            timestamp: timestamp.to_string(),
        });
    }

    Ok(RawLine {
        timestamp: timestamp.to_string(),
        tokens,
    })
}

/// Splits the text after the timestamp into byte tokens, dropping any prefix
/// that precedes the first hex byte.
fn split_hex_section(section: &str) -> Vec<String> {
    let mut words = section.split_whitespace();
    let mut tokens = Vec::new();

    for word in words.by_ref() {
        if parse_byte(word).is_some() {
            tokens.push(word.to_string());
            break;
        }
        // Prefix glued onto the first byte
        if let Some(tail) = hex_tail(word) {
            tokens.push(tail.to_string());
            break;
        }
    }

    tokens.extend(words.map(str::to_string));
    tokens
}

/// Trailing two hex digits of a word, if it ends with them.
fn hex_tail(word: &str) -> Option<&str> {
    let split = word.len().checked_sub(2)?;
    let tail = word.get(split..)?;
    parse_byte(tail).map(|_| tail)
}

impl RawLine {
    /// Number of byte tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Fails with `TooShort` when fewer than `required` tokens are present.
    pub fn ensure_len(&self, required: usize) -> Result<()> {
        if self.tokens.len() < required {
            return Err(CaptureError::TooShort {
                timestamp: self.timestamp.clone(),
                found: self.tokens.len(),
                required,
            });
        }
        Ok(())
    }

    /// Views the tokens as consecutive `size`-byte groups. The last group may be short.
    pub fn groups(&self, size: usize) -> std::slice::Chunks<'_, String> {
        self.tokens.chunks(size.max(1))
    }

    /// Position of the first occurrence of `bytes` in the token sequence.
    pub fn find_bytes(&self, bytes: &[u8]) -> Option<usize> {
        if bytes.is_empty() || self.tokens.len() < bytes.len() {
            return None;
        }
        (0..=self.tokens.len() - bytes.len())
            .find(|&start| tokens_equal(&self.tokens[start..], bytes))
    }

    /// Drops the first `offset` tokens.
    pub fn split_off_front(mut self, offset: usize) -> RawLine {
        let offset = offset.min(self.tokens.len());
        self.tokens.drain(..offset);
        self
    }
}

/// True when `tokens` starts with exactly the byte sequence `bytes`.
pub fn tokens_equal(tokens: &[String], bytes: &[u8]) -> bool {
    tokens.len() >= bytes.len()
        && tokens
            .iter()
            .zip(bytes)
            .all(|(token, &byte)| parse_byte(token) == Some(byte))
}
