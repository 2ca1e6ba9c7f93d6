//! Output sinks: point-frame JSON and CSV/Parquet tables.

use crate::aggregate::FrameAverage;
use crate::converter::TableConverter;
use crate::error::{CaptureError, Result};
use crate::frame::{Frame, FrameBody};
use crate::numeric::{round2, Decoded};
use polars::prelude::*;
use serde_json::{json, Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Separator used for every CSV the tool writes.
pub const CSV_SEPARATOR: u8 = b';';

/// Shape of the point-frame JSON records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointJson {
    /// Header blocks plus every point field as captured hex
    Raw,
    /// Timestamp and decoded coordinates only
    Decoded,
}

/// On-disk table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Picks a format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Some(TableFormat::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => Some(TableFormat::Parquet),
            _ => None,
        }
    }
}

fn coordinate(value: &Decoded<f32>) -> Value {
    match value {
        Decoded::Value(v) if v.is_finite() => json!(round2(f64::from(*v))),
        Decoded::Value(v) => Value::String(v.to_string()),
        Decoded::Raw(s) => Value::String(s.clone()),
    }
}

/// Renders one point-cloud frame as a JSON object.
///
/// Point keys carry the 1-based point index (`x1`, `SNR1`, ...). Returns `None`
/// for person frames.
pub fn point_frame_json(frame: &Frame, shape: PointJson) -> Option<Value> {
    let FrameBody::PointCloud { header, points, .. } = &frame.body else {
        return None;
    };

    let points: Vec<Value> = points
        .iter()
        .map(|p| {
            let n = p.index;
            let mut obj = Map::new();
            match shape {
                PointJson::Raw => {
                    for (axis, text) in ["x", "y", "z"].iter().zip(&p.xyz_hex) {
                        obj.insert(format!("{axis}{n}"), Value::String(text.clone()));
                    }
                    obj.insert(format!("v{n}"), Value::String(p.v.clone()));
                    obj.insert(format!("SNR{n}"), Value::String(p.snr.clone()));
                    obj.insert(format!("POW{n}"), Value::String(p.pow.clone()));
                    obj.insert(format!("DPK{n}"), Value::String(p.dpk.clone()));
                }
                PointJson::Decoded => {
                    obj.insert(format!("x{n}"), coordinate(&p.x));
                    obj.insert(format!("y{n}"), coordinate(&p.y));
                    obj.insert(format!("z{n}"), coordinate(&p.z));
                }
            }
            Value::Object(obj)
        })
        .collect();

    let value = match shape {
        PointJson::Raw => json!({
            "time": frame.timestamp,
            "headers": header.magic,
            "frame": header.frame_counter,
            "TLV1": header.tlv1,
            "PointL": header.point_length_hex(),
            "points": points,
        }),
        PointJson::Decoded => json!({
            "time": frame.timestamp,
            "points": points,
        }),
    };
    Some(value)
}

/// Writes point-cloud frames as a pretty-printed JSON array.
pub fn write_points_json<W: Write>(frames: &[Frame], shape: PointJson, writer: W) -> Result<()> {
    let records: Vec<Value> = frames
        .iter()
        .filter_map(|f| point_frame_json(f, shape))
        .collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Writes any serializable records as a pretty-printed JSON array.
pub fn write_json<T: serde::Serialize, W: Write>(records: &[T], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

/// Writes a table to `path` in the given format.
pub fn write_table(df: &mut DataFrame, path: &Path, format: TableFormat) -> Result<()> {
    let mut file = File::create(path)?;
    match format {
        TableFormat::Csv => {
            CsvWriter::new(&mut file)
                .include_header(true)
                .with_separator(CSV_SEPARATOR)
                .finish(df)?;
        }
        TableFormat::Parquet => {
            ParquetWriter::new(file).finish(df)?;
        }
    }
    Ok(())
}

/// Writes a table, inferring the format from the extension.
pub fn write_table_auto(df: &mut DataFrame, path: &Path) -> Result<()> {
    let format = TableFormat::from_path(path).ok_or_else(|| {
        CaptureError::InvalidFormat(format!(
            "cannot determine table format from {}",
            path.display()
        ))
    })?;
    write_table(df, path, format)
}

/// Writes frame averages as JSON, CSV or Parquet depending on the extension.
pub fn write_averages(averages: &[FrameAverage], path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            write_json(averages, BufWriter::new(File::create(path)?))
        }
        _ => {
            let mut df = TableConverter::averages(averages)?;
            write_table_auto(&mut df, path)
        }
    }
}
