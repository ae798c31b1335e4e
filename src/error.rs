//! # Read Errors
//!
//! Public operations return `eyre::Result`. The failures a caller may want to
//! branch on are raised as a typed [`ReadError`] and converted into an
//! `eyre::Report` at the API boundary, so they can be recovered with
//! `report.downcast_ref::<ReadError>()`.
//!
//! ## Taxonomy
//!
//! | Kind | Raised by | Effect |
//! |------|-----------|--------|
//! | Configuration | `setup`, `get`, builder `open` | nothing is read |
//! | Structural | `read`, cursor primitives | the parse aborts |
//!
//! Conversion failures (non-numeric text in a numeric column) are not errors:
//! the cell is stored as a missing-value sentinel and counted.
//!
//! Structural variants carry the byte `offset` into the buffer and the 1-based
//! `record` number of the physical record in the file (a header, when present,
//! is record 1).

use thiserror::Error;

/// Coarse classification of a [`ReadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Structural,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("unknown column type tag '{0}'")]
    UnknownColumnType(String),

    #[error("schema is empty: at least one column type is required")]
    EmptySchema,

    #[error("schema declares {declared} columns but the first data record has {found} fields")]
    ColumnCountMismatch { declared: usize, found: usize },

    #[error("invalid dialect: {0}")]
    InvalidDialect(String),

    #[error("schema declares more than one row-label column")]
    MultipleRowLabels,

    #[error("no decoded columns: call read() before get()")]
    NotRead,

    #[error("unterminated quoted field opened at byte {offset} (record {record})")]
    UnterminatedQuote { record: usize, offset: usize },

    #[error(
        "record {record} has too few fields: expected {expected}, found {found} (byte {offset})"
    )]
    TooFewFields {
        record: usize,
        offset: usize,
        expected: usize,
        found: usize,
    },

    #[error("record {record} has more than {expected} fields (byte {offset})")]
    TooManyFields {
        record: usize,
        offset: usize,
        expected: usize,
    },

    #[error("unexpected byte {byte:#04x} after closing quote at byte {offset} (record {record})")]
    UnexpectedByteAfterQuote {
        record: usize,
        offset: usize,
        byte: u8,
    },

    #[error("expected a separator or row terminator at byte {offset}, found {byte:#04x} (record {record})")]
    ExpectedDelimiter {
        record: usize,
        offset: usize,
        byte: u8,
    },

    #[error("unexpected end of input at byte {offset}: expected {expected} records, found {found}")]
    UnexpectedEof {
        offset: usize,
        expected: usize,
        found: usize,
    },
}

impl ReadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReadError::UnknownColumnType(_)
            | ReadError::EmptySchema
            | ReadError::ColumnCountMismatch { .. }
            | ReadError::InvalidDialect(_)
            | ReadError::MultipleRowLabels
            | ReadError::NotRead => ErrorKind::Configuration,
            ReadError::UnterminatedQuote { .. }
            | ReadError::TooFewFields { .. }
            | ReadError::TooManyFields { .. }
            | ReadError::UnexpectedByteAfterQuote { .. }
            | ReadError::ExpectedDelimiter { .. }
            | ReadError::UnexpectedEof { .. } => ErrorKind::Structural,
        }
    }

    /// Byte offset at which a structural error was detected.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ReadError::UnterminatedQuote { offset, .. }
            | ReadError::TooFewFields { offset, .. }
            | ReadError::TooManyFields { offset, .. }
            | ReadError::UnexpectedByteAfterQuote { offset, .. }
            | ReadError::ExpectedDelimiter { offset, .. }
            | ReadError::UnexpectedEof { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub fn is_structural(&self) -> bool {
        self.kind() == ErrorKind::Structural
    }
}
