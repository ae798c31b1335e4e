//! Separator, quote and escape bytes fixed for the lifetime of one parse.

use crate::config::{is_row_terminator, DEFAULT_ESCAPE, DEFAULT_QUOTE, DEFAULT_SEPARATOR};
use crate::error::ReadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dialect {
    pub separator: u8,
    pub quote: u8,
    pub escape: u8,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            quote: DEFAULT_QUOTE,
            escape: DEFAULT_ESCAPE,
        }
    }
}

impl Dialect {
    pub fn new(separator: u8, quote: u8, escape: u8) -> Self {
        Self {
            separator,
            quote,
            escape,
        }
    }

    /// Checks that the three bytes can be told apart from each other and from
    /// the row terminators. `escape == quote` is allowed and gives RFC 4180
    /// doubled-quote escaping.
    pub fn validate(&self) -> Result<(), ReadError> {
        for (name, byte) in [
            ("separator", self.separator),
            ("quote", self.quote),
            ("escape", self.escape),
        ] {
            if is_row_terminator(byte) {
                return Err(ReadError::InvalidDialect(format!(
                    "{} byte {:#04x} is a row terminator",
                    name, byte
                )));
            }
        }

        if self.separator == self.quote {
            return Err(ReadError::InvalidDialect(format!(
                "separator and quote are both {:?}",
                self.separator as char
            )));
        }

        if self.separator == self.escape {
            return Err(ReadError::InvalidDialect(format!(
                "separator and escape are both {:?}",
                self.separator as char
            )));
        }

        Ok(())
    }

    /// True when `content` must be quoted to survive a write/read round trip.
    pub fn needs_quoting(&self, content: &[u8]) -> bool {
        content
            .iter()
            .any(|&b| b == self.separator || b == self.quote || is_row_terminator(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dialect_is_comma_doublequote_backslash() {
        let dialect = Dialect::default();

        assert_eq!(dialect.separator, b',');
        assert_eq!(dialect.quote, b'"');
        assert_eq!(dialect.escape, b'\\');
        assert!(dialect.validate().is_ok());
    }

    #[test]
    fn rejects_newline_separator() {
        let err = Dialect::new(b'\n', b'"', b'\\').validate().unwrap_err();

        assert!(matches!(err, ReadError::InvalidDialect(_)));
        assert!(err.to_string().contains("separator"));
    }

    #[test]
    fn rejects_separator_equal_to_quote() {
        assert!(Dialect::new(b'"', b'"', b'\\').validate().is_err());
    }

    #[test]
    fn rejects_separator_equal_to_escape() {
        assert!(Dialect::new(b';', b'"', b';').validate().is_err());
    }

    #[test]
    fn allows_escape_equal_to_quote() {
        assert!(Dialect::new(b'\t', b'"', b'"').validate().is_ok());
    }

    #[test]
    fn needs_quoting_detects_structural_bytes() {
        let dialect = Dialect::default();

        assert!(dialect.needs_quoting(b"a,b"));
        assert!(dialect.needs_quoting(b"say \"hi\""));
        assert!(dialect.needs_quoting(b"two\nlines"));
        assert!(!dialect.needs_quoting(b"plain"));
        assert!(!dialect.needs_quoting(b""));
    }
}
