//! # Reader Builder
//!
//! `ReaderBuilder` collects the dialect and decoding options before the
//! input is opened. Unset options fall back to the defaults below.
//!
//! ## Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | separator | `,` | field separator byte |
//! | quote | `"` | quote byte |
//! | escape | `\` | escape byte; equal to `quote` gives doubled-quote escaping only |
//! | has_header | false | first record holds column names |
//! | ncol | first-record peek | expected field count per record |
//! | int_strategy | `Grammar` | integer converter |
//! | double_strategy | `Grammar` | floating-point converter |
//!
//! ## Usage
//!
//! ```ignore
//! let reader = Reader::builder()
//!     .separator(b';')
//!     .has_header(true)
//!     .double_strategy(NumericStrategy::FastApprox)
//!     .open("data.csv")?;
//! ```
//!
//! The dialect is validated when `open` or `from_bytes` is called; a
//! separator that collides with the quote or escape byte, or any of the
//! three being a row terminator, fails with
//! [`ReadError::InvalidDialect`](crate::error::ReadError::InvalidDialect).

use std::path::Path;

use eyre::{Result, WrapErr};

use super::Reader;
use crate::config::{DEFAULT_ESCAPE, DEFAULT_QUOTE, DEFAULT_SEPARATOR};
use crate::cursor::Dialect;
use crate::numeric::NumericStrategy;
use crate::storage::MappedFile;

#[derive(Debug, Clone)]
pub struct ReaderBuilder {
    separator: Option<u8>,
    quote: Option<u8>,
    escape: Option<u8>,
    has_header: Option<bool>,
    ncol: Option<usize>,
    int_strategy: Option<NumericStrategy>,
    double_strategy: Option<NumericStrategy>,
}

impl Default for ReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self {
            separator: None,
            quote: None,
            escape: None,
            has_header: None,
            ncol: None,
            int_strategy: None,
            double_strategy: None,
        }
    }

    pub fn separator(mut self, byte: u8) -> Self {
        self.separator = Some(byte);
        self
    }

    pub fn quote(mut self, byte: u8) -> Self {
        self.quote = Some(byte);
        self
    }

    pub fn escape(mut self, byte: u8) -> Self {
        self.escape = Some(byte);
        self
    }

    /// Sets separator, quote and escape at once.
    pub fn dialect(self, dialect: Dialect) -> Self {
        self.separator(dialect.separator)
            .quote(dialect.quote)
            .escape(dialect.escape)
    }

    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    /// Fixes the expected number of fields per record instead of peeking at
    /// the first data record.
    pub fn ncol(mut self, ncol: usize) -> Self {
        self.ncol = Some(ncol);
        self
    }

    pub fn int_strategy(mut self, strategy: NumericStrategy) -> Self {
        self.int_strategy = Some(strategy);
        self
    }

    pub fn double_strategy(mut self, strategy: NumericStrategy) -> Self {
        self.double_strategy = Some(strategy);
        self
    }

    /// Maps the file at `path` and prepares a reader over it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the dialect is invalid
    /// - the file cannot be opened or mapped
    /// - `has_header` is set and the header record is malformed
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<Reader> {
        let path = path.as_ref();
        let source = MappedFile::open(path)?;
        self.build(source)
            .wrap_err_with(|| format!("failed to prepare reader for '{}'", path.display()))
    }

    /// Prepares a reader over an in-memory buffer.
    pub fn from_bytes(self, bytes: impl Into<Vec<u8>>) -> Result<Reader> {
        self.build(MappedFile::from_bytes(bytes))
    }

    fn build(self, source: MappedFile) -> Result<Reader> {
        Reader::with_source(
            source,
            self.get_dialect(),
            self.get_has_header(),
            self.ncol,
            self.get_int_strategy(),
            self.get_double_strategy(),
        )
    }

    /// Dialect with defaults filled in.
    pub fn get_dialect(&self) -> Dialect {
        Dialect::new(
            self.separator.unwrap_or(DEFAULT_SEPARATOR),
            self.quote.unwrap_or(DEFAULT_QUOTE),
            self.escape.unwrap_or(DEFAULT_ESCAPE),
        )
    }

    pub fn get_has_header(&self) -> bool {
        self.has_header.unwrap_or(false)
    }

    /// Returns the configured field count, if any.
    pub fn get_ncol(&self) -> Option<usize> {
        self.ncol
    }

    pub fn get_int_strategy(&self) -> NumericStrategy {
        self.int_strategy.unwrap_or_default()
    }

    pub fn get_double_strategy(&self) -> NumericStrategy {
        self.double_strategy.unwrap_or_default()
    }
}
