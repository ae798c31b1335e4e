//! Reference converters built on `str::parse`.
//!
//! Every other strategy is measured against these. Blanks around the number
//! are trimmed; the remainder must be valid UTF-8 and a complete literal.

use std::str;

use super::{narrow_int, trim_blanks};

pub fn parse_int(bytes: &[u8]) -> Option<i32> {
    let text = str::from_utf8(trim_blanks(bytes)).ok()?;
    let value = text.parse::<i64>().ok()?;
    narrow_int(value)
}

pub fn parse_double(bytes: &[u8]) -> Option<f64> {
    let text = str::from_utf8(trim_blanks(bytes)).ok()?;
    text.parse::<f64>().ok()
}
