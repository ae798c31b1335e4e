//! # Fields
//!
//! A [`Field`] is the raw byte span of one cell, borrowed from the input
//! buffer. For quoted fields the span excludes the enclosing quotes. Escape
//! sequences are left in place; [`Field::decode`] removes them, borrowing
//! when the span contains none.
//!
//! ## Escape Rules
//!
//! | Context | Sequence | Decodes to |
//! |---------|----------|------------|
//! | quoted | `escape quote` | `quote` |
//! | quoted | `quote quote` | `quote` |
//! | unquoted | `escape separator` | `separator` |
//!
//! Any other escape byte is literal content.

use std::borrow::Cow;

use super::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    bytes: &'a [u8],
    start: usize,
    quoted: bool,
    escaped: bool,
    dialect: Dialect,
}

impl<'a> Field<'a> {
    pub(crate) fn new(
        bytes: &'a [u8],
        start: usize,
        quoted: bool,
        escaped: bool,
        dialect: Dialect,
    ) -> Self {
        Self {
            bytes,
            start,
            quoted,
            escaped,
            dialect,
        }
    }

    /// The span as it appears in the buffer, escapes intact.
    #[inline]
    pub fn raw(&self) -> &'a [u8] {
        self.bytes
    }

    /// Offset of the first content byte in the buffer.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last content byte.
    pub fn end(&self) -> usize {
        self.start + self.bytes.len()
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    pub fn has_escapes(&self) -> bool {
        self.escaped
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Content with quoting and escaping removed.
    #[inline]
    pub fn decode(&self) -> Cow<'a, [u8]> {
        if !self.escaped {
            return Cow::Borrowed(self.bytes);
        }

        if self.quoted {
            Cow::Owned(unescape_quoted(self.bytes, &self.dialect))
        } else {
            Cow::Owned(unescape_unquoted(self.bytes, &self.dialect))
        }
    }

    /// Decoded content as text. Invalid UTF-8 is replaced, not rejected.
    pub fn decode_str(&self) -> Cow<'a, str> {
        match self.decode() {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
            Cow::Owned(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Cow::Owned(text),
                Err(err) => Cow::Owned(String::from_utf8_lossy(err.as_bytes()).into_owned()),
            },
        }
    }
}

fn unescape_quoted(bytes: &[u8], dialect: &Dialect) -> Vec<u8> {
    let Dialect { quote, escape, .. } = *dialect;
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        if (b == escape || b == quote) && next == Some(quote) {
            out.push(quote);
            i += 2;
        } else {
            out.push(b);
            i += 1;
        }
    }

    out
}

fn unescape_unquoted(bytes: &[u8], dialect: &Dialect) -> Vec<u8> {
    let Dialect {
        separator, escape, ..
    } = *dialect;
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == escape && bytes.get(i + 1) == Some(&separator) {
            out.push(separator);
            i += 2;
        } else {
            out.push(b);
            i += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quoted(bytes: &[u8]) -> Field<'_> {
        Field::new(bytes, 1, true, true, Dialect::default())
    }

    #[test]
    fn unescaped_field_borrows() {
        let field = Field::new(b"plain", 0, false, false, Dialect::default());

        assert!(matches!(field.decode(), Cow::Borrowed(b"plain")));
        assert_eq!(field.end(), 5);
    }

    #[test]
    fn escape_before_quote_yields_literal_quote() {
        assert_eq!(quoted(br#"say \"hi\""#).decode().as_ref(), br#"say "hi""#);
    }

    #[test]
    fn doubled_quote_yields_literal_quote() {
        assert_eq!(quoted(br#"c""d"#).decode().as_ref(), br#"c"d"#);
    }

    #[test]
    fn escape_not_before_quote_is_literal() {
        assert_eq!(quoted(br"C:\temp").decode().as_ref(), br"C:\temp");
    }

    #[test]
    fn escaped_separator_in_unquoted_field() {
        let field = Field::new(br"a\,b", 0, false, true, Dialect::default());

        assert_eq!(field.decode().as_ref(), b"a,b");
    }

    #[test]
    fn decode_str_replaces_invalid_utf8() {
        let field = Field::new(b"ok\xff", 0, false, false, Dialect::default());

        assert_eq!(field.decode_str(), "ok\u{fffd}");
    }
}
