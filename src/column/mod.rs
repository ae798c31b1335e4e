//! # Typed Columns
//!
//! Schema tags, per-column decoders and the finished output.
//!
//! ```text
//! schema: [Skip, Factor, Integer]
//!            │      │       │
//!            ▼      ▼       ▼
//! decoders: Skip  Factor  Integer      one per input column, sized for n rows
//!                   │       │
//!                   ▼       ▼
//! table:     [Factor(codes, levels), Integer(values)]   skip columns omitted
//! ```
//!
//! A `RowLabel` column is decoded like a string column and surfaced as the
//! table's row names instead of a data column.

mod column_type;
mod decoder;
mod factor;
mod table;

pub use column_type::{parse_schema, schema_from_tags, ColumnType};
pub use decoder::ColumnDecoder;
pub use factor::{Factor, FactorEncoder};
pub use table::{NamedColumn, Table};

use crate::config::NA_INTEGER;

/// A finished column of `n` values.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Integer(Vec<i32>),
    Double(Vec<f64>),
    Factor(Factor),
    String(Vec<String>),
}

impl Column {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Integer(_) => ColumnType::Integer,
            Column::Double(_) => ColumnType::Double,
            Column::Factor(_) => ColumnType::Factor,
            Column::String(_) => ColumnType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Integer(values) => values.len(),
            Column::Double(values) => values.len(),
            Column::Factor(factor) => factor.len(),
            Column::String(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the cell at `row` holds the missing-value sentinel.
    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Column::Integer(values) => values.get(row) == Some(&NA_INTEGER),
            Column::Double(values) => values.get(row).is_some_and(|v| v.is_nan()),
            Column::Factor(_) | Column::String(_) => false,
        }
    }

    pub fn as_integers(&self) -> Option<&[i32]> {
        match self {
            Column::Integer(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_doubles(&self) -> Option<&[f64]> {
        match self {
            Column::Double(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_factor(&self) -> Option<&Factor> {
        match self {
            Column::Factor(factor) => Some(factor),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Column::String(values) => Some(values.as_slice()),
            _ => None,
        }
    }
}
