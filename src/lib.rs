//! # typedcsv - Single-Pass Typed CSV Decoding
//!
//! typedcsv reads a delimited text table from a memory-mapped file and turns
//! it, in one pass, into strongly typed columns. There is no intermediate
//! row representation: each field is located in the mapped bytes and handed
//! straight to the decoder for its column.
//!
//! - **Zero-copy tokenizing**: fields are `&[u8]` spans into the mapping
//! - **Pre-sized storage**: every column is allocated once for `n` rows
//! - **Pluggable numeric conversion**: four strategies behind one contract
//!
//! ## Quick Start
//!
//! ```ignore
//! use typedcsv::{ColumnType, Reader};
//!
//! let mut reader = Reader::builder()
//!     .has_header(true)
//!     .open("measurements.csv")?;
//!
//! let n = reader.count_rows()?;
//! let table = reader.read_table(
//!     n,
//!     &[ColumnType::RowLabel, ColumnType::Factor, ColumnType::Double],
//! )?;
//!
//! let factor = table.get(0).and_then(|c| c.as_factor());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Reader (orchestrator)         │
//! ├─────────────────────────────────────┤
//! │  Column decoders │ Factor encoder    │
//! ├──────────────────┴──────────────────┤
//! │        Numeric converters            │
//! ├─────────────────────────────────────┤
//! │       Cursor / tokenizer             │
//! ├─────────────────────────────────────┤
//! │     Memory-mapped input (memmap2)    │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Errors
//!
//! Fallible operations return `eyre::Result`. Schema problems and malformed
//! input surface as a [`ReadError`] inside the report; conversion failures
//! in numeric columns are stored as missing values and counted instead.
//!
//! ## Module Overview
//!
//! - [`config`]: default dialect, missing-value sentinels, converter tolerance
//! - [`storage`]: read-only mapped input
//! - [`cursor`]: dialect, fields, record boundaries, line counting
//! - [`numeric`]: standard, grammar, fast and naive converters
//! - [`column`]: schema tags, decoders, factor encoding, output table
//! - [`reader`]: `Reader` and `ReaderBuilder`
//! - [`writer`]: CSV serialization of a table

pub mod column;
pub mod config;
pub mod cursor;
pub mod error;
pub mod numeric;
pub mod reader;
pub mod storage;
pub mod writer;

pub use column::{Column, ColumnType, Factor, NamedColumn, Table};
pub use cursor::{count_lines, Dialect};
pub use error::{ErrorKind, ReadError};
pub use numeric::NumericStrategy;
pub use reader::{Reader, ReaderBuilder};
pub use writer::{write_csv, write_csv_with_header};
