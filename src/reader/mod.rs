//! # Reader - Single-Pass Typed Decoding
//!
//! The [`Reader`] owns the input buffer and its dialect, and drives the scan
//! that turns `n` records into typed columns:
//!
//! ```text
//! for row in 0..n
//!     for column in 0..ncol
//!         field = cursor.next_field()
//!         decoders[column].set(row, field)
//!         cursor.move_until_next_token_start(separator | row end)
//! ```
//!
//! ## Lifecycle
//!
//! | Call | Effect |
//! |------|--------|
//! | `setup(n, schema)` | validates the schema, builds one decoder per column, rewinds to the first data record |
//! | `read(n, schema)` | `setup` followed by the scan |
//! | `get()` | consumes the decoders and assembles a [`Table`] |
//! | `read_table(n, schema)` | `read` then `get` |
//!
//! Any error from `setup` or `read` discards the decoders, so a failed parse
//! never surfaces a partial table. Typed failures are [`ReadError`] values
//! inside the returned `eyre::Report`.
//!
//! ## Header
//!
//! With `has_header`, the first record is parsed once at construction and
//! supplies column names; data starts on the next record. Without it,
//! columns are named `V1..Vk` by input position.
//!
//! ## Column Count
//!
//! The schema length must equal the caller-supplied `ncol` or, when none was
//! given, the field count of the first data record. A mismatch is reported
//! as [`ReadError::ColumnCountMismatch`] before any row is decoded. Records
//! after the first with a different count fail the scan with
//! [`ReadError::TooFewFields`] or [`ReadError::TooManyFields`].
//!
//! ## Example
//!
//! ```ignore
//! use typedcsv::{ColumnType, Reader};
//!
//! let mut reader = Reader::open("scores.csv")?;
//! let n = reader.count_rows()?;
//! let table = reader.read_table(n, &[ColumnType::String, ColumnType::Double])?;
//! ```

mod builder;

pub use builder::ReaderBuilder;

use std::path::Path;
use std::time::Instant;

use eyre::{ensure, Result, WrapErr};

use crate::column::{Column, ColumnDecoder, ColumnType, NamedColumn, Table};
use crate::config::{DEFAULT_COLUMN_PREFIX, NA_DOUBLE, NA_INTEGER};
use crate::cursor::{count_lines, count_records, record_at, Cursor, Dialect, Expect};
use crate::error::ReadError;
use crate::numeric::NumericStrategy;
use crate::storage::MappedFile;

#[derive(Debug)]
pub struct Reader {
    source: MappedFile,
    dialect: Dialect,
    int_strategy: NumericStrategy,
    double_strategy: NumericStrategy,
    ncol: Option<usize>,
    header: Option<Vec<String>>,
    data_start: usize,
    data_record: usize,
    position: usize,
    record: usize,
    n: usize,
    names: Vec<String>,
    decoders: Vec<ColumnDecoder>,
    decoded: bool,
}

impl Reader {
    pub fn builder() -> ReaderBuilder {
        ReaderBuilder::new()
    }

    /// Maps `path` with the default dialect and no header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        ReaderBuilder::new().open(path)
    }

    /// Reads from an in-memory buffer with the default dialect and no header.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        ReaderBuilder::new().from_bytes(bytes)
    }

    pub(crate) fn with_source(
        source: MappedFile,
        dialect: Dialect,
        has_header: bool,
        ncol: Option<usize>,
        int_strategy: NumericStrategy,
        double_strategy: NumericStrategy,
    ) -> Result<Self> {
        dialect.validate()?;
        if let Some(ncol) = ncol {
            ensure!(ncol > 0, ReadError::EmptySchema);
        }

        let bytes = source.as_bytes();
        let (header, data_start, data_record) = if has_header && !bytes.is_empty() {
            let mut cursor = Cursor::new(bytes, dialect);
            let names = cursor
                .next_record()
                .wrap_err("failed to parse header record")?
                .iter()
                .map(|field| field.decode_str().into_owned())
                .collect();
            (Some(names), cursor.position(), cursor.record())
        } else if has_header {
            (Some(Vec::new()), 0, 1)
        } else {
            (None, 0, 1)
        };

        tracing::debug!(
            path = ?source.path(),
            bytes = source.len(),
            header_fields = ?header.as_ref().map(Vec::len),
            "reader ready"
        );

        Ok(Self {
            source,
            dialect,
            int_strategy,
            double_strategy,
            ncol,
            header,
            data_start,
            data_record,
            position: data_start,
            record: data_record,
            n: 0,
            names: Vec::new(),
            decoders: Vec::new(),
            decoded: false,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    /// Current byte offset of the read point.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the read point. The offset should be the start of a field.
    pub fn set_position(&mut self, offset: usize) -> Result<()> {
        ensure!(
            offset <= self.source.len(),
            "position {} is past the end of the input ({} bytes)",
            offset,
            self.source.len()
        );
        self.position = offset;
        self.record = record_at(self.source.as_bytes(), offset);
        Ok(())
    }

    /// Physical lines in the whole input, header included. Quotes are not
    /// interpreted.
    pub fn count_lines(&self) -> usize {
        count_lines(self.source.as_bytes())
    }

    /// Data records after the header, honouring quoted newlines.
    pub fn count_rows(&self) -> Result<usize> {
        let rows = count_records(self.source.as_bytes(), self.dialect, self.data_start)?;
        Ok(rows)
    }

    /// Validates `schema` and prepares one decoder per column for `n` rows.
    pub fn setup(&mut self, n: usize, schema: &[ColumnType]) -> Result<()> {
        self.decoders.clear();
        self.names.clear();
        self.decoded = false;
        self.position = self.data_start;
        self.record = self.data_record;

        ensure!(!schema.is_empty(), ReadError::EmptySchema);
        ensure!(
            schema.iter().filter(|t| **t == ColumnType::RowLabel).count() <= 1,
            ReadError::MultipleRowLabels
        );

        let found = self.expected_columns(schema.len())?;
        ensure!(
            found == schema.len(),
            ReadError::ColumnCountMismatch {
                declared: schema.len(),
                found,
            }
        );

        let int_parser = self.int_strategy.int_parser();
        let double_parser = self.double_strategy.double_parser();
        self.decoders = schema
            .iter()
            .map(|&ty| ColumnDecoder::new(ty, n, int_parser, double_parser))
            .collect();
        self.names = (0..schema.len()).map(|i| self.column_name(i)).collect();
        self.n = n;

        tracing::debug!(
            rows = n,
            columns = schema.len(),
            ints = self.int_strategy.name(),
            doubles = self.double_strategy.name(),
            "decoders ready"
        );

        Ok(())
    }

    /// `setup` with the schema given as type names.
    pub fn setup_named<S: AsRef<str>>(&mut self, n: usize, schema: &[S]) -> Result<()> {
        let schema = crate::column::parse_schema(schema)?;
        self.setup(n, &schema)
    }

    /// Decodes `n` records into the columns described by `schema`.
    pub fn read(&mut self, n: usize, schema: &[ColumnType]) -> Result<()> {
        self.setup(n, schema)?;

        let started = Instant::now();
        let mut cursor =
            Cursor::with_position(self.source.as_bytes(), self.dialect, self.position, self.record);

        if let Err(err) = decode_rows(&mut cursor, &mut self.decoders, n) {
            self.decoders.clear();
            return Err(err).wrap_err_with(|| format!("failed to read {} records", n));
        }

        self.position = cursor.position();
        self.record = cursor.record();
        self.decoded = true;

        tracing::debug!(
            rows = n,
            bytes = self.position - self.data_start,
            elapsed_us = started.elapsed().as_micros() as u64,
            "records decoded"
        );

        Ok(())
    }

    /// Assembles the decoded columns, skip columns omitted, row labels
    /// surfaced separately. Consumes the decoders.
    pub fn get(&mut self) -> Result<Table> {
        ensure!(self.decoded, ReadError::NotRead);
        self.decoded = false;

        let decoders = std::mem::take(&mut self.decoders);
        let names = std::mem::take(&mut self.names);
        let mut columns = Vec::with_capacity(decoders.len());
        let mut row_names = None;

        for (position, (decoder, name)) in decoders.into_iter().zip(names).enumerate() {
            let coerced = decoder.coerced();
            let is_rownames = decoder.is_rownames();

            let Some(column) = decoder.get() else {
                continue;
            };

            if is_rownames {
                if let Column::String(labels) = column {
                    row_names = Some(labels);
                }
                continue;
            }

            if coerced > 0 {
                tracing::warn!(
                    column = %name,
                    coerced,
                    column_type = %column.column_type(),
                    "cells stored as missing"
                );
            }

            columns.push(NamedColumn {
                name,
                position,
                column,
                coerced,
            });
        }

        tracing::debug!(
            columns = columns.len(),
            row_names = row_names.is_some(),
            "table assembled"
        );

        Ok(Table::new(columns, row_names, self.n))
    }

    pub fn read_table(&mut self, n: usize, schema: &[ColumnType]) -> Result<Table> {
        self.read(n, schema)?;
        self.get()
    }

    /// Decodes the field at the read point as text and moves past its
    /// delimiter.
    pub fn next_string(&mut self) -> Result<String> {
        let mut cursor = self.cursor();
        ensure!(
            !cursor.is_eof(),
            ReadError::UnexpectedEof {
                offset: cursor.position(),
                expected: 1,
                found: 0,
            }
        );

        let field = cursor.next_field()?;
        let text = field.decode_str().into_owned();
        cursor.move_until_next_token_start(Expect::Any)?;
        let mark = (cursor.position(), cursor.record());
        self.advance_to(mark);

        Ok(text)
    }

    /// Converts the next `n` fields to doubles with `strategy`, treating
    /// separators and row terminators alike.
    pub fn parse_doubles(&mut self, n: usize, strategy: NumericStrategy) -> Result<Vec<f64>> {
        let parse = strategy.double_parser();
        self.parse_values(n, |bytes| parse(bytes).unwrap_or(NA_DOUBLE))
    }

    /// Converts the next `n` fields to integers with `strategy`.
    pub fn parse_ints(&mut self, n: usize, strategy: NumericStrategy) -> Result<Vec<i32>> {
        let parse = strategy.int_parser();
        self.parse_values(n, |bytes| parse(bytes).unwrap_or(NA_INTEGER))
    }

    fn parse_values<T>(&mut self, n: usize, convert: impl Fn(&[u8]) -> T) -> Result<Vec<T>> {
        let mut cursor = self.cursor();
        let mut values = Vec::with_capacity(n);

        for found in 0..n {
            ensure!(
                !cursor.is_eof(),
                ReadError::UnexpectedEof {
                    offset: cursor.position(),
                    expected: n,
                    found,
                }
            );
            let field = cursor.next_field()?;
            values.push(convert(field.decode().as_ref()));
            cursor.move_until_next_token_start(Expect::Any)?;
        }

        let mark = (cursor.position(), cursor.record());
        self.advance_to(mark);
        Ok(values)
    }

    fn cursor(&self) -> Cursor<'_> {
        Cursor::with_position(self.source.as_bytes(), self.dialect, self.position, self.record)
    }

    fn advance_to(&mut self, (position, record): (usize, usize)) {
        self.position = position;
        self.record = record;
    }

    fn expected_columns(&self, declared: usize) -> Result<usize> {
        if let Some(ncol) = self.ncol {
            return Ok(ncol);
        }

        let peeked = self.cursor().peek_field_count()?;
        if peeked > 0 {
            return Ok(peeked);
        }

        Ok(match &self.header {
            Some(header) if !header.is_empty() => header.len(),
            _ => declared,
        })
    }

    fn column_name(&self, index: usize) -> String {
        self.header
            .as_ref()
            .and_then(|header| header.get(index))
            .cloned()
            .unwrap_or_else(|| format!("{}{}", DEFAULT_COLUMN_PREFIX, index + 1))
    }
}

fn decode_rows(
    cursor: &mut Cursor<'_>,
    decoders: &mut [ColumnDecoder],
    n: usize,
) -> Result<(), ReadError> {
    let ncol = decoders.len();

    for row in 0..n {
        if cursor.is_eof() {
            return Err(ReadError::UnexpectedEof {
                offset: cursor.position(),
                expected: n,
                found: row,
            });
        }

        for (column, decoder) in decoders.iter_mut().enumerate() {
            let field = cursor.next_field()?;
            decoder.set(row, &field);

            let expect = if column + 1 < ncol {
                Expect::Separator { column, ncol }
            } else {
                Expect::RowEnd { ncol }
            };
            cursor.move_until_next_token_start(expect)?;
        }
    }

    Ok(())
}
