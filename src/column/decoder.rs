//! # Column Decoders
//!
//! One [`ColumnDecoder`] per schema entry. Each owns storage pre-sized for
//! `n` rows and is written exactly once per row, in row order, by
//! [`ColumnDecoder::set`]. [`ColumnDecoder::get`] consumes the decoder and
//! yields the finished column.
//!
//! ## Dispatch
//!
//! The variant set is closed, so decoders are an enum rather than trait
//! objects. The numeric strategy is resolved to a function pointer when the
//! decoder is built; the per-cell path is one `match` on the variant and one
//! direct call.
//!
//! ## Missing Values
//!
//! | Field | Integer | Double | Counted as coerced |
//! |-------|---------|--------|--------------------|
//! | `NA` | `i32::MIN` | NaN | no |
//! | empty | `i32::MIN` | NaN | yes |
//! | not a number | `i32::MIN` | NaN | yes |

use crate::config::{NA_DOUBLE, NA_INTEGER, NA_TEXT};
use crate::cursor::Field;
use crate::error::ReadError;
use crate::numeric::{DoubleParser, IntParser, NumericStrategy};

use super::factor::FactorEncoder;
use super::{Column, ColumnType};

#[derive(Debug)]
pub enum ColumnDecoder {
    Integer {
        values: Vec<i32>,
        parse: IntParser,
        coerced: usize,
    },
    Double {
        values: Vec<f64>,
        parse: DoubleParser,
        coerced: usize,
    },
    Factor(FactorEncoder),
    String(Vec<String>),
    RowLabel(Vec<String>),
    Skip,
}

impl ColumnDecoder {
    pub fn new(
        column_type: ColumnType,
        n: usize,
        int_parser: IntParser,
        double_parser: DoubleParser,
    ) -> Self {
        match column_type {
            ColumnType::Integer => ColumnDecoder::Integer {
                values: vec![NA_INTEGER; n],
                parse: int_parser,
                coerced: 0,
            },
            ColumnType::Double => ColumnDecoder::Double {
                values: vec![NA_DOUBLE; n],
                parse: double_parser,
                coerced: 0,
            },
            ColumnType::Factor => ColumnDecoder::Factor(FactorEncoder::new(n)),
            ColumnType::String => ColumnDecoder::String(vec![String::new(); n]),
            ColumnType::RowLabel => ColumnDecoder::RowLabel(vec![String::new(); n]),
            ColumnType::Skip => ColumnDecoder::Skip,
        }
    }

    /// Builds a decoder from an integer schema tag.
    pub fn from_tag(
        tag: u8,
        n: usize,
        ints: NumericStrategy,
        doubles: NumericStrategy,
    ) -> Result<Self, ReadError> {
        let column_type = ColumnType::try_from(tag)?;
        Ok(Self::new(
            column_type,
            n,
            ints.int_parser(),
            doubles.double_parser(),
        ))
    }

    /// Builds a decoder from a type name such as `"numeric"`.
    pub fn from_name(
        name: &str,
        n: usize,
        ints: NumericStrategy,
        doubles: NumericStrategy,
    ) -> Result<Self, ReadError> {
        let column_type: ColumnType = name.parse()?;
        Ok(Self::new(
            column_type,
            n,
            ints.int_parser(),
            doubles.double_parser(),
        ))
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnDecoder::Integer { .. } => ColumnType::Integer,
            ColumnDecoder::Double { .. } => ColumnType::Double,
            ColumnDecoder::Factor(_) => ColumnType::Factor,
            ColumnDecoder::String(_) => ColumnType::String,
            ColumnDecoder::RowLabel(_) => ColumnType::RowLabel,
            ColumnDecoder::Skip => ColumnType::Skip,
        }
    }

    /// Stores `field` at `row`. `row` must be below the `n` the decoder was
    /// built with.
    #[inline]
    pub fn set(&mut self, row: usize, field: &Field<'_>) {
        match self {
            ColumnDecoder::Integer {
                values,
                parse,
                coerced,
            } => {
                let content = field.decode();
                match (*parse)(content.as_ref()) {
                    Some(value) => values[row] = value,
                    None => *coerced += usize::from(!is_na(&content)),
                }
            }
            ColumnDecoder::Double {
                values,
                parse,
                coerced,
            } => {
                let content = field.decode();
                match (*parse)(content.as_ref()) {
                    Some(value) => values[row] = value,
                    None => *coerced += usize::from(!is_na(&content)),
                }
            }
            ColumnDecoder::Factor(encoder) => encoder.set(row, &field.decode()),
            ColumnDecoder::String(values) | ColumnDecoder::RowLabel(values) => {
                values[row] = field.decode_str().into_owned();
            }
            ColumnDecoder::Skip => {}
        }
    }

    /// Finished column; `None` for a skip decoder. Row labels come back as a
    /// string column.
    pub fn get(self) -> Option<Column> {
        match self {
            ColumnDecoder::Integer { values, .. } => Some(Column::Integer(values)),
            ColumnDecoder::Double { values, .. } => Some(Column::Double(values)),
            ColumnDecoder::Factor(encoder) => Some(Column::Factor(encoder.finish())),
            ColumnDecoder::String(values) | ColumnDecoder::RowLabel(values) => {
                Some(Column::String(values))
            }
            ColumnDecoder::Skip => None,
        }
    }

    pub fn skip(&self) -> bool {
        matches!(self, ColumnDecoder::Skip)
    }

    pub fn is_rownames(&self) -> bool {
        matches!(self, ColumnDecoder::RowLabel(_))
    }

    /// Cells stored as missing because conversion failed.
    pub fn coerced(&self) -> usize {
        match self {
            ColumnDecoder::Integer { coerced, .. } | ColumnDecoder::Double { coerced, .. } => {
                *coerced
            }
            _ => 0,
        }
    }
}

#[inline]
fn is_na(content: &[u8]) -> bool {
    crate::numeric::trim_blanks(content) == NA_TEXT.as_bytes()
}
