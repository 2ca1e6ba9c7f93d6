//! Conversion of decoded frames into Polars tables.
//!
//! Three table shapes are produced:
//! 1. Person table: one row per frame with persons, fixed `ID1..Vz{max}` columns
//! 2. Point table: one row per point (long format)
//! 3. Average table: one row per point-cloud frame

use crate::aggregate::FrameAverage;
use crate::builders::DataFrameBuilder;
use crate::error::{CaptureError, Result};
use crate::frame::{Frame, FrameBody};
use crate::numeric::round2;
use crate::types::{CellValue, ColumnType};
use polars::prelude::*;

/// Per-person column prefixes in record order.
const PERSON_COLUMNS: [(&str, ColumnType); 8] = [
    ("ID", ColumnType::UInt64),
    ("Q", ColumnType::Float32),
    ("X", ColumnType::Float32),
    ("Y", ColumnType::Float32),
    ("Z", ColumnType::Float32),
    ("Vx", ColumnType::Float32),
    ("Vy", ColumnType::Float32),
    ("Vz", ColumnType::Float32),
];

/// Converts decoded frames to Polars DataFrames.
pub struct TableConverter;

impl TableConverter {
    /// Builds the person table.
    ///
    /// Frames without any complete person record are left out, and person
    /// columns that are empty in every row are dropped.
    pub fn persons(frames: &[Frame], max_persons: usize) -> Result<DataFrame> {
        let mut columns = vec![
            ("TLV2".to_string(), ColumnType::String),
            ("NumPeople".to_string(), ColumnType::UInt32),
        ];
        for n in 1..=max_persons {
            for (prefix, dtype) in PERSON_COLUMNS {
                columns.push((format!("{}{}", prefix, n), dtype));
            }
        }

        let mut builder = DataFrameBuilder::new("Time", columns, frames.len());
        let mut saw_person_frame = false;

        for frame in frames {
            let FrameBody::Persons { header, persons } = &frame.body else {
                continue;
            };
            saw_person_frame = true;
            if persons.is_empty() {
                continue;
            }

            let mut row = vec![
                Some(CellValue::from(header.tlv2_type())),
                Some(CellValue::from(&header.num_people)),
            ];
            for person in persons.iter().take(max_persons) {
                row.push(Some(CellValue::from(&person.id)));
                for (_, field) in person.float_fields() {
                    row.push(Some(CellValue::from(field)));
                }
            }
            builder.push_row(&frame.timestamp, row);
        }

        if !saw_person_frame && !frames.is_empty() {
            return Err(CaptureError::InvalidFormat(
                "person table requested for point-cloud frames".to_string(),
            ));
        }

        builder.build(true)
    }

    /// Builds the long-format point table (`time, index, x, y, z, v, SNR, POW, DPK`).
    pub fn points(frames: &[Frame]) -> Result<DataFrame> {
        let columns = vec![
            ("index".to_string(), ColumnType::UInt32),
            ("x".to_string(), ColumnType::Float32),
            ("y".to_string(), ColumnType::Float32),
            ("z".to_string(), ColumnType::Float32),
            ("v".to_string(), ColumnType::String),
            ("SNR".to_string(), ColumnType::String),
            ("POW".to_string(), ColumnType::String),
            ("DPK".to_string(), ColumnType::String),
        ];
        let capacity = frames.iter().map(Frame::record_count).sum();
        let mut builder = DataFrameBuilder::new("time", columns, capacity);

        for frame in frames {
            let Some(points) = frame.points() else {
                continue;
            };
            for p in points {
                builder.push_row(
                    &frame.timestamp,
                    vec![
                        Some(CellValue::UInt32(p.index as u32)),
                        Some(CellValue::from(&p.x)),
                        Some(CellValue::from(&p.y)),
                        Some(CellValue::from(&p.z)),
                        Some(CellValue::from(p.v.as_str())),
                        Some(CellValue::from(p.snr.as_str())),
                        Some(CellValue::from(p.pow.as_str())),
                        Some(CellValue::from(p.dpk.as_str())),
                    ],
                );
            }
        }

        builder.build(false)
    }

    /// Builds the average table; values are rounded to two decimals.
    pub fn averages(averages: &[FrameAverage]) -> Result<DataFrame> {
        let columns = ["average_x", "average_y", "average_z"]
            .iter()
            .map(|name| (name.to_string(), ColumnType::Float64))
            .collect();
        let mut builder = DataFrameBuilder::new("time", columns, averages.len());

        for avg in averages {
            let cell = |v: Option<f64>| v.map(|v| CellValue::from(round2(v)));
            builder.push_row(
                &avg.timestamp,
                vec![cell(avg.avg_x), cell(avg.avg_y), cell(avg.avg_z)],
            );
        }

        builder.build(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DecoderConfig, FrameMode};
    use crate::frame::decode_line;

    const DEBUG3_HEADER: &str = "01 02 03 04 05 06 07 08 70 00 00 00 5F 02 00 00 \
                                 01 00 00 00 00 00 00 00 02 00 00 00 40 00 00 00";
    const PERSON: &str = "00 00 00 01 00 00 80 3F 00 00 80 3F 00 00 00 40 00 00 40 40 \
                          00 00 00 3F 00 00 20 C0 00 00 00 00";

    fn person_frame(time: &str, persons: usize) -> Frame {
        let body = vec![PERSON; persons].join(" ");
        let line = format!("[{}]{} {}", time, DEBUG3_HEADER, body);
        decode_line(&line, &DecoderConfig::new(FrameMode::PersonTracking)).unwrap()
    }

    #[test]
    fn test_person_table_columns() {
        let frames = vec![person_frame("10:00:00.000", 2), person_frame("10:00:00.100", 1)];
        let df = TableConverter::persons(&frames, 5).unwrap();

        assert_eq!(df.height(), 2);
        // Time, TLV2, NumPeople + 2 persons x 8 fields
        assert_eq!(df.width(), 3 + 16);

        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(&names[..5], ["Time", "TLV2", "NumPeople", "ID1", "Q1"]);
        assert!(!names.contains(&"ID3".to_string()));

        assert_eq!(df.column("X1").unwrap().dtype(), &DataType::Float32);
        assert_eq!(df.column("ID1").unwrap().dtype(), &DataType::UInt64);
        assert_eq!(df.column("X2").unwrap().null_count(), 1);
        assert_eq!(df.column("TLV2").unwrap().str().unwrap().get(0), Some("02"));
        assert_eq!(df.column("NumPeople").unwrap().u32().unwrap().get(0), Some(2));
    }

    #[test]
    fn test_person_table_skips_empty_frames() {
        let frames = vec![person_frame("10:00:00.000", 0), person_frame("10:00:00.100", 1)];
        let df = TableConverter::persons(&frames, 5).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("Time").unwrap().str().unwrap().get(0), Some("10:00:00.100"));
    }

    #[test]
    fn test_person_table_rejects_point_frames() {
        let header = "01 02 03 04 05 06 07 08 5F 02 00 00 38 00 00 00 01 00 00 00 3F 02 00 00";
        let frame = decode_line(&format!("[10:00:00.000]{}", header), &DecoderConfig::default())
            .unwrap();
        assert!(TableConverter::persons(&[frame], 5).is_err());
    }

    #[test]
    fn test_average_table() {
        let averages = vec![
            FrameAverage {
                timestamp: "10:00:00.000".to_string(),
                avg_x: Some(1.234_56),
                avg_y: Some(2.0),
                avg_z: Some(-0.005),
            },
            FrameAverage {
                timestamp: "10:00:00.100".to_string(),
                avg_x: None,
                avg_y: None,
                avg_z: None,
            },
        ];
        let df = TableConverter::averages(&averages).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 4);
        let x = df.column("average_x").unwrap().f64().unwrap();
        assert_eq!(x.get(0), Some(1.23));
        assert_eq!(x.get(1), None);
    }
}
