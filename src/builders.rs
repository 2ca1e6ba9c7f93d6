//! Column builders for constructing Polars tables from decoded frames.
//!
//! This module provides builders that handle:
//! - Ragged rows (frames with fewer records than the widest frame)
//! - Null-filling for missing cells
//! - Per-column dtype inference with `String` fallback for raw cells
//! - Dropping columns that stayed null in every row

use crate::error::Result;
use crate::types::{CellValue, ColumnType};
use polars::prelude::*;

/// A builder for a single column.
pub struct ColumnBuilder {
    name: String,
    /// Used when no cell carries a value to infer from
    default_dtype: ColumnType,
    values: Vec<Option<CellValue>>,
}

impl ColumnBuilder {
    /// Creates a new ColumnBuilder with pre-allocated capacity.
    pub fn new(name: impl Into<String>, default_dtype: ColumnType, capacity: usize) -> Self {
        Self {
            name: name.into(),
            default_dtype,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Adds a value to the builder.
    pub fn push(&mut self, value: Option<CellValue>) {
        self.values.push(value);
    }

    /// Adds a null value to the builder.
    pub fn push_null(&mut self) {
        self.values.push(None);
    }

    /// Returns true if no cell holds a value.
    pub fn is_all_null(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// The dtype the built Series will have.
    pub fn dtype(&self) -> ColumnType {
        ColumnType::infer(&self.values).unwrap_or(self.default_dtype)
    }

    /// Builds a Polars Series from the accumulated values.
    pub fn build(self) -> Series {
        let dtype = self.dtype();
        let name = self.name.as_str();

        match dtype {
            ColumnType::Float32 => {
                let values: Vec<Option<f32>> = self
                    .values
                    .into_iter()
                    .map(|opt| match opt {
                        Some(CellValue::Float32(v)) => Some(v),
                        _ => None,
                    })
                    .collect();
                Series::new(name.into(), values)
            }
            ColumnType::Float64 => {
                let values: Vec<Option<f64>> = self
                    .values
                    .into_iter()
                    .map(|opt| match opt {
                        Some(CellValue::Float64(v)) => Some(v),
                        _ => None,
                    })
                    .collect();
                Series::new(name.into(), values)
            }
            ColumnType::UInt32 => {
                let values: Vec<Option<u32>> = self
                    .values
                    .into_iter()
                    .map(|opt| match opt {
                        Some(CellValue::UInt32(v)) => Some(v),
                        _ => None,
                    })
                    .collect();
                Series::new(name.into(), values)
            }
            ColumnType::UInt64 => {
                let values: Vec<Option<u64>> = self
                    .values
                    .into_iter()
                    .map(|opt| match opt {
                        Some(CellValue::UInt64(v)) => Some(v),
                        _ => None,
                    })
                    .collect();
                Series::new(name.into(), values)
            }
            ColumnType::String => {
                let values: Vec<Option<String>> = self
                    .values
                    .into_iter()
                    .map(|opt| opt.map(|cell| cell.to_text()))
                    .collect();
                Series::new(name.into(), values)
            }
        }
    }
}

/// A collection of column builders keyed by a leading time column.
pub struct DataFrameBuilder {
    time_name: String,
    time: Vec<String>,
    columns: Vec<ColumnBuilder>,
}

impl DataFrameBuilder {
    /// Creates a new DataFrameBuilder with pre-allocated capacity.
    pub fn new(time_name: &str, columns: Vec<(String, ColumnType)>, capacity: usize) -> Self {
        let columns = columns
            .into_iter()
            .map(|(name, dtype)| ColumnBuilder::new(name, dtype, capacity))
            .collect();

        Self {
            time_name: time_name.to_string(),
            time: Vec::with_capacity(capacity),
            columns,
        }
    }

    /// Adds a row to the builder. Missing trailing values are null-filled.
    pub fn push_row(&mut self, time: &str, values: Vec<Option<CellValue>>) {
        self.time.push(time.to_string());

        let mut values = values.into_iter();
        for builder in self.columns.iter_mut() {
            match values.next() {
                Some(value) => builder.push(value),
                None => builder.push_null(),
            }
        }
    }

    /// Builds a Polars DataFrame, optionally dropping columns that are null in every row.
    pub fn build(self, drop_empty: bool) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.columns.len() + 1);

        columns.push(Series::new(self.time_name.as_str().into(), self.time).into());

        for builder in self.columns {
            if drop_empty && builder.is_all_null() {
                continue;
            }
            columns.push(builder.build().into());
        }

        Ok(DataFrame::new(columns)?)
    }
}
