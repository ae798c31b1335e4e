//! # Grammar Converters
//!
//! A field is first matched against a declarative number grammar, then the
//! recognised span is handed to `fast_float` for correctly rounded
//! conversion. Results are bit-identical to the standard converter.
//!
//! ## Grammar
//!
//! ```text
//! double   := blank* sign? (special | decimal) blank*
//! decimal  := (digits ('.' digits?)? | '.' digits) exponent?
//! exponent := ('e' | 'E') sign? digits
//! special  := "inf" | "infinity" | "nan"          (any case)
//!
//! integer  := blank* sign? digits blank*
//! ```
//!
//! Matching is done with a tiny scanner whose rules are combined in the same
//! shape as the grammar above, so each rule reads like its production.

use super::{narrow_int, parse_special, trim_blanks};

/// Byte scanner. Every rule either consumes input and returns `true`, or
/// leaves the position untouched and returns `false`.
struct Input<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Input<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn is_done(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn byte(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn one_of(&mut self, set: &[u8]) -> bool {
        match self.peek() {
            Some(b) if set.contains(&b) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn digits(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// Runs `rule`, rewinding when it fails.
    fn attempt(&mut self, rule: impl FnOnce(&mut Self) -> bool) -> bool {
        let saved = self.pos;
        if rule(self) {
            true
        } else {
            self.pos = saved;
            false
        }
    }

    fn sign(&mut self) -> bool {
        self.one_of(b"+-")
    }

    fn exponent(&mut self) -> bool {
        self.attempt(|i| i.one_of(b"eE") && {
            i.sign();
            i.digits()
        })
    }

    fn decimal(&mut self) -> bool {
        let mantissa = self.attempt(|i| {
            i.digits() && {
                if i.byte(b'.') {
                    i.digits();
                }
                true
            }
        }) || self.attempt(|i| i.byte(b'.') && i.digits());

        if mantissa {
            self.exponent();
        }
        mantissa
    }
}

pub fn parse_int(bytes: &[u8]) -> Option<i32> {
    let body = trim_blanks(bytes);
    let mut input = Input::new(body);
    let negative = input.peek() == Some(b'-');
    input.sign();
    let digits_start = input.pos;

    if !input.digits() || !input.is_done() {
        return None;
    }

    let mut value: i64 = 0;
    for &b in &body[digits_start..] {
        value = value.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
    }

    narrow_int(if negative { -value } else { value })
}

pub fn parse_double(bytes: &[u8]) -> Option<f64> {
    let body = trim_blanks(bytes);
    if let Some(special) = parse_special(body) {
        return Some(special);
    }

    let mut input = Input::new(body);
    let negative = input.peek() == Some(b'-');
    input.sign();
    let unsigned = &body[input.pos..];

    if !input.decimal() || !input.is_done() {
        return None;
    }

    let value: f64 = fast_float::parse(unsigned).ok()?;
    Some(if negative { -value } else { value })
}
