//! # Cursor - Zero-Copy Field Tokenizer
//!
//! This module walks the mapped byte buffer one field at a time. Fields are
//! returned as [`Field`] spans borrowed from the buffer; nothing is copied
//! unless a field contains escape sequences and its decoded content is asked
//! for.
//!
//! ## State
//!
//! ```text
//! start = 0 <= position <= end = bytes.len()
//! ```
//!
//! `position` never passes `end`. `record` is the 1-based number of the
//! physical record `position` is in; it advances only when a row terminator
//! is consumed, so newlines inside quoted fields do not count.
//!
//! ## Field Grammar
//!
//! ```text
//! record     := field (separator field)* terminator?
//! terminator := "\n" | "\r\n" | "\r"
//! field      := quoted | unquoted
//! quoted     := quote (byte | escape quote | quote quote)* quote
//! unquoted   := (byte - separator - terminator | escape separator)*
//! ```
//!
//! Inside a quoted field, separators and newlines are data. A closing quote
//! must be followed by a separator, a terminator or the end of input.
//!
//! ## Driving the Cursor
//!
//! The orchestrator alternates two primitives:
//!
//! ```ignore
//! let field = cursor.next_field()?;
//! cursor.move_until_next_token_start(Expect::Separator { column, ncol })?;
//! ```
//!
//! `next_field` stops on the byte after the field. `move_until_next_token_start`
//! consumes exactly the delimiter the caller expects and reports a structural
//! error otherwise, which is how short and long records are detected.
//!
//! ## Performance
//!
//! Unquoted fields are located with `memchr3` over separator, `\n` and `\r`;
//! quoted fields with `memchr`/`memchr2` over quote and escape.

mod dialect;
mod field;
mod lines;

pub use dialect::Dialect;
pub use field::Field;
pub use lines::{count_lines, count_records, record_at};

use memchr::{memchr, memchr2, memchr3};

use crate::config::is_row_terminator;
use crate::error::ReadError;

/// Delimiter the caller expects after the field just read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Another field follows in this record.
    Separator { column: usize, ncol: usize },
    /// The field was the last of its record.
    RowEnd { ncol: usize },
    /// Either; used when walking a single column of values.
    Any,
}

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    dialect: Dialect,
    pos: usize,
    record: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8], dialect: Dialect) -> Self {
        Self::with_position(bytes, dialect, 0, 1)
    }

    pub fn with_position(bytes: &'a [u8], dialect: Dialect, pos: usize, record: usize) -> Self {
        Self {
            bytes,
            dialect,
            pos: pos.min(bytes.len()),
            record,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn record(&self) -> usize {
        self.record
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// True at the end of input or on a row terminator.
    pub fn at_row_end(&self) -> bool {
        self.bytes
            .get(self.pos)
            .map_or(true, |&b| is_row_terminator(b))
    }

    /// Counts row terminators over the whole buffer without moving.
    pub fn count_lines(&self) -> usize {
        count_lines(self.bytes)
    }

    /// Locates the field starting at `position` and stops on the byte after
    /// it. At the end of input this yields an empty unquoted field.
    pub fn next_field(&mut self) -> Result<Field<'a>, ReadError> {
        match self.bytes.get(self.pos) {
            Some(&b) if b == self.dialect.quote => self.scan_quoted(),
            Some(_) => Ok(self.scan_unquoted()),
            None => Ok(Field::new(&[], self.pos, false, false, self.dialect)),
        }
    }

    /// Consumes the delimiter that follows a field and returns the number of
    /// bytes advanced (0 at the end of input, 2 for `\r\n`).
    pub fn move_until_next_token_start(&mut self, expect: Expect) -> Result<usize, ReadError> {
        let offset = self.pos;
        let next = self.bytes.get(offset).copied();
        let separator = self.dialect.separator;

        match (expect, next) {
            (Expect::Separator { .. } | Expect::Any, Some(b)) if b == separator => {
                self.pos += 1;
                Ok(1)
            }
            (Expect::RowEnd { .. } | Expect::Any, Some(b)) if is_row_terminator(b) => {
                Ok(self.consume_row_terminator())
            }
            (Expect::RowEnd { .. } | Expect::Any, None) => Ok(0),
            (Expect::Separator { column, ncol }, None) => Err(ReadError::TooFewFields {
                record: self.record,
                offset,
                expected: ncol,
                found: column + 1,
            }),
            (Expect::Separator { column, ncol }, Some(b)) if is_row_terminator(b) => {
                Err(ReadError::TooFewFields {
                    record: self.record,
                    offset,
                    expected: ncol,
                    found: column + 1,
                })
            }
            (Expect::RowEnd { ncol }, Some(b)) if b == separator => {
                Err(ReadError::TooManyFields {
                    record: self.record,
                    offset,
                    expected: ncol,
                })
            }
            (_, Some(byte)) => Err(ReadError::ExpectedDelimiter {
                record: self.record,
                offset,
                byte,
            }),
        }
    }

    /// Reads every field of the current record and consumes its terminator.
    pub fn next_record(&mut self) -> Result<Vec<Field<'a>>, ReadError> {
        let mut fields = Vec::new();

        loop {
            fields.push(self.next_field()?);
            let more = self.bytes.get(self.pos) == Some(&self.dialect.separator);
            self.move_until_next_token_start(Expect::Any)?;
            if !more {
                return Ok(fields);
            }
        }
    }

    /// Skips the current record, returning how many fields it had.
    pub fn skip_record(&mut self) -> Result<usize, ReadError> {
        let mut count = 0;

        loop {
            self.next_field()?;
            count += 1;
            match self.bytes.get(self.pos) {
                Some(&b) if b == self.dialect.separator => self.pos += 1,
                Some(&b) if is_row_terminator(b) => {
                    self.consume_row_terminator();
                    return Ok(count);
                }
                None => return Ok(count),
                Some(&byte) => {
                    return Err(ReadError::ExpectedDelimiter {
                        record: self.record,
                        offset: self.pos,
                        byte,
                    })
                }
            }
        }
    }

    /// Number of fields in the current record, without moving. Zero at the
    /// end of input.
    pub fn peek_field_count(&self) -> Result<usize, ReadError> {
        if self.is_eof() {
            return Ok(0);
        }
        self.clone().skip_record()
    }

    fn consume_row_terminator(&mut self) -> usize {
        let advanced = match (self.bytes.get(self.pos), self.bytes.get(self.pos + 1)) {
            (Some(b'\r'), Some(b'\n')) => 2,
            (Some(b'\r' | b'\n'), _) => 1,
            _ => 0,
        };

        if advanced > 0 {
            self.pos += advanced;
            self.record += 1;
        }

        advanced
    }

    fn scan_unquoted(&mut self) -> Field<'a> {
        let start = self.pos;
        let Dialect {
            separator, escape, ..
        } = self.dialect;
        let mut escaped = false;

        loop {
            match memchr3(separator, b'\n', b'\r', &self.bytes[self.pos..]) {
                Some(idx) => {
                    let at = self.pos + idx;
                    if self.bytes[at] == separator && at > start && self.bytes[at - 1] == escape {
                        escaped = true;
                        self.pos = at + 1;
                        continue;
                    }
                    self.pos = at;
                    break;
                }
                None => {
                    self.pos = self.bytes.len();
                    break;
                }
            }
        }

        Field::new(
            &self.bytes[start..self.pos],
            start,
            false,
            escaped,
            self.dialect,
        )
    }

    fn scan_quoted(&mut self) -> Result<Field<'a>, ReadError> {
        let open = self.pos;
        let content_start = open + 1;
        let Dialect {
            separator,
            quote,
            escape,
        } = self.dialect;
        let mut escaped = false;

        self.pos = content_start;

        loop {
            let rest = &self.bytes[self.pos..];
            let hit = if escape == quote {
                memchr(quote, rest)
            } else {
                memchr2(quote, escape, rest)
            };

            let Some(idx) = hit else {
                self.pos = open;
                return Err(ReadError::UnterminatedQuote {
                    record: self.record,
                    offset: open,
                });
            };

            let at = self.pos + idx;
            let next = self.bytes.get(at + 1).copied();

            if next == Some(quote) && (self.bytes[at] == quote || self.bytes[at] == escape) {
                escaped = true;
                self.pos = at + 2;
                continue;
            }

            if self.bytes[at] != quote {
                self.pos = at + 1;
                continue;
            }

            self.pos = at + 1;

            return match self.bytes.get(self.pos) {
                Some(&b) if b != separator && !is_row_terminator(b) => {
                    Err(ReadError::UnexpectedByteAfterQuote {
                        record: self.record,
                        offset: self.pos,
                        byte: b,
                    })
                }
                _ => Ok(Field::new(
                    &self.bytes[content_start..at],
                    content_start,
                    true,
                    escaped,
                    self.dialect,
                )),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(bytes: &[u8]) -> Cursor<'_> {
        Cursor::new(bytes, Dialect::default())
    }

    fn fields(bytes: &[u8]) -> Vec<String> {
        let mut c = cursor(bytes);
        c.next_record()
            .unwrap()
            .iter()
            .map(|f| f.decode_str().into_owned())
            .collect()
    }

    #[test]
    fn splits_unquoted_fields() {
        assert_eq!(fields(b"1,abc,3.5\n"), vec!["1", "abc", "3.5"]);
    }

    #[test]
    fn quoted_separator_is_data() {
        assert_eq!(fields(b"1,\"a,b\",3\n"), vec!["1", "a,b", "3"]);
    }

    #[test]
    fn quoted_newline_is_data() {
        let mut c = cursor(b"\"two\nlines\",x\nnext\n");

        let record = c.next_record().unwrap();

        assert_eq!(record[0].decode_str(), "two\nlines");
        assert_eq!(record[1].decode_str(), "x");
        assert_eq!(c.record(), 2);
        assert_eq!(c.next_field().unwrap().raw(), b"next");
    }

    #[test]
    fn escaped_quote_does_not_close_field() {
        assert_eq!(fields(br#""say \"hi\"",2"#), vec![r#"say "hi""#, "2"]);
    }

    #[test]
    fn doubled_quote_does_not_close_field() {
        assert_eq!(fields(b"2,\"c\"\"d\",\n"), vec!["2", "c\"d", ""]);
    }

    #[test]
    fn escaped_separator_in_unquoted_field() {
        assert_eq!(fields(br"a\,b,c"), vec!["a,b", "c"]);
    }

    #[test]
    fn next_field_reports_quoting() {
        let mut c = cursor(b"\"q\",u");

        let first = c.next_field().unwrap();
        c.move_until_next_token_start(Expect::Separator { column: 0, ncol: 2 })
            .unwrap();
        let second = c.next_field().unwrap();

        assert!(first.is_quoted());
        assert_eq!(first.start(), 1);
        assert!(!second.is_quoted());
    }

    #[test]
    fn unterminated_quote_is_structural() {
        let mut c = cursor(b"1,\"never closed\n2,3\n");
        c.next_field().unwrap();
        c.move_until_next_token_start(Expect::Separator { column: 0, ncol: 2 })
            .unwrap();

        let err = c.next_field().unwrap_err();

        assert_eq!(
            err,
            ReadError::UnterminatedQuote {
                record: 1,
                offset: 2
            }
        );
        assert_eq!(c.position(), 2);
    }

    #[test]
    fn byte_after_closing_quote_is_structural() {
        let err = cursor(b"\"ab\"c,d").next_field().unwrap_err();

        assert!(matches!(
            err,
            ReadError::UnexpectedByteAfterQuote {
                offset: 4,
                byte: b'c',
                ..
            }
        ));
    }

    #[test]
    fn move_returns_bytes_advanced() {
        let mut c = cursor(b"a,b\r\nc\nd");

        c.next_field().unwrap();
        assert_eq!(
            c.move_until_next_token_start(Expect::Separator { column: 0, ncol: 2 })
                .unwrap(),
            1
        );
        c.next_field().unwrap();
        assert_eq!(
            c.move_until_next_token_start(Expect::RowEnd { ncol: 2 })
                .unwrap(),
            2
        );
        c.next_field().unwrap();
        assert_eq!(c.move_until_next_token_start(Expect::Any).unwrap(), 1);
        c.next_field().unwrap();
        assert_eq!(c.move_until_next_token_start(Expect::Any).unwrap(), 0);
        assert!(c.is_eof());
        assert_eq!(c.record(), 3);
    }

    #[test]
    fn short_record_is_detected() {
        let mut c = cursor(b"1,2\n");
        c.next_field().unwrap();
        c.move_until_next_token_start(Expect::Separator { column: 0, ncol: 3 })
            .unwrap();
        c.next_field().unwrap();

        let err = c
            .move_until_next_token_start(Expect::Separator { column: 1, ncol: 3 })
            .unwrap_err();

        assert_eq!(
            err,
            ReadError::TooFewFields {
                record: 1,
                offset: 3,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn premature_eof_is_detected() {
        let mut c = cursor(b"1");
        c.next_field().unwrap();

        let err = c
            .move_until_next_token_start(Expect::Separator { column: 0, ncol: 2 })
            .unwrap_err();

        assert!(matches!(err, ReadError::TooFewFields { offset: 1, .. }));
    }

    #[test]
    fn long_record_is_detected() {
        let mut c = cursor(b"1,2\n");
        c.next_field().unwrap();

        let err = c
            .move_until_next_token_start(Expect::RowEnd { ncol: 1 })
            .unwrap_err();

        assert_eq!(
            err,
            ReadError::TooManyFields {
                record: 1,
                offset: 1,
                expected: 1
            }
        );
    }

    #[test]
    fn peek_field_count_does_not_move() {
        let c = cursor(b"a,\"b,c\",d\n1\n");

        assert_eq!(c.peek_field_count().unwrap(), 3);
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn empty_line_is_one_empty_field() {
        let mut c = cursor(b"\nx\n");

        assert_eq!(c.skip_record().unwrap(), 1);
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn custom_dialect() {
        let mut c = Cursor::new(b"'a;b';c|'d'\n", Dialect::new(b';', b'\'', b'|'));

        let record = c.next_record().unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record[0].decode_str(), "a;b");
        assert_eq!(record[1].decode_str(), "c|'d'");
    }

    #[test]
    fn position_never_passes_end() {
        let c = Cursor::with_position(b"abc", Dialect::default(), 99, 1);

        assert_eq!(c.position(), 3);
        assert!(c.is_eof());
        assert!(c.at_row_end());
    }
}
