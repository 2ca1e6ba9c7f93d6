//! Cell values and column type inference for tabular output.
//!
//! Decoded fields may be numbers or raw pass-through text. A column takes a
//! numeric dtype only when every non-null cell decoded; one raw cell turns the
//! whole column into `String`, with numbers rendered the way the decoder
//! formats them.

use crate::numeric::Decoded;

/// Column types produced by the capture tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Float32,
    Float64,
    UInt32,
    UInt64,
    String,
}

impl ColumnType {
    /// Infers the column type from its cells. Returns `None` if every cell is null.
    pub fn infer<'a, I>(cells: I) -> Option<ColumnType>
    where
        I: IntoIterator<Item = &'a Option<CellValue>>,
    {
        let mut inferred: Option<ColumnType> = None;
        for cell in cells.into_iter().flatten() {
            let dtype = cell.dtype();
            inferred = match inferred {
                None => Some(dtype),
                Some(prev) if prev == dtype => Some(prev),
                Some(_) => return Some(ColumnType::String),
            };
        }
        inferred
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Float32(f32),
    Float64(f64),
    UInt32(u32),
    UInt64(u64),
    String(String),
}

impl CellValue {
    /// Returns the ColumnType of this value.
    pub fn dtype(&self) -> ColumnType {
        match self {
            CellValue::Float32(_) => ColumnType::Float32,
            CellValue::Float64(_) => ColumnType::Float64,
            CellValue::UInt32(_) => ColumnType::UInt32,
            CellValue::UInt64(_) => ColumnType::UInt64,
            CellValue::String(_) => ColumnType::String,
        }
    }

    /// Text form used when a column falls back to `String`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Float32(v) => format!("{:.2}", v),
            CellValue::Float64(v) => format!("{:.2}", v),
            CellValue::UInt32(v) => v.to_string(),
            CellValue::UInt64(v) => v.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }
}

impl From<&Decoded<f32>> for CellValue {
    fn from(value: &Decoded<f32>) -> Self {
        match value {
            Decoded::Value(v) => CellValue::Float32(*v),
            Decoded::Raw(s) => CellValue::String(s.clone()),
        }
    }
}

impl From<&Decoded<u32>> for CellValue {
    fn from(value: &Decoded<u32>) -> Self {
        match value {
            Decoded::Value(v) => CellValue::UInt32(*v),
            Decoded::Raw(s) => CellValue::String(s.clone()),
        }
    }
}

impl From<&Decoded<u64>> for CellValue {
    fn from(value: &Decoded<u64>) -> Self {
        match value {
            Decoded::Value(v) => CellValue::UInt64(*v),
            Decoded::Raw(s) => CellValue::String(s.clone()),
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float64(value)
    }
}
