//! # Numeric Converters
//!
//! Four interchangeable algorithms turn a field's byte span into an `i32` or
//! an `f64`. They share one contract:
//!
//! - a syntactically valid field converts to the value the standard library
//!   would produce (the approximate converter: within
//!   [`FAST_ATOF_MAX_RELATIVE_ERROR`](crate::config::FAST_ATOF_MAX_RELATIVE_ERROR))
//! - anything else returns `None`, never a silent zero
//!
//! ## Strategies
//!
//! | Strategy | Module | Algorithm | Exact |
//! |----------|--------|-----------|-------|
//! | `Standard` | `standard` | `str::parse` | yes, reference |
//! | `Grammar` | `grammar` | declarative grammar + `fast_float` | yes (default) |
//! | `FastApprox` | `fast` | hand-rolled accumulation | within 1e-12 |
//! | `Naive` | `naive` | bare digit accumulation | restricted input |
//!
//! Surrounding blanks (space, tab) are accepted by every strategy except
//! `Naive`, which assumes pure `[+-]?digits` input.
//!
//! ## Selection
//!
//! A strategy is resolved once to a plain function pointer when a column
//! decoder is built, so the per-cell hot loop makes a direct call instead of
//! matching on the strategy:
//!
//! ```ignore
//! use typedcsv::numeric::NumericStrategy;
//!
//! let parse = NumericStrategy::Grammar.int_parser();
//! assert_eq!(parse(b"-42"), Some(-42));
//! ```
//!
//! ## Integer Range
//!
//! `i32::MIN` is the missing-value sentinel, so every integer converter
//! rejects it along with anything outside `i32`.

pub mod fast;
pub mod grammar;
pub mod naive;
pub mod standard;

use std::str::FromStr;

use crate::config::NA_INTEGER;
use crate::error::ReadError;

pub type IntParser = fn(&[u8]) -> Option<i32>;
pub type DoubleParser = fn(&[u8]) -> Option<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumericStrategy {
    Standard,
    FastApprox,
    #[default]
    Grammar,
    Naive,
}

impl NumericStrategy {
    pub const ALL: [NumericStrategy; 4] = [
        NumericStrategy::Standard,
        NumericStrategy::FastApprox,
        NumericStrategy::Grammar,
        NumericStrategy::Naive,
    ];

    pub fn int_parser(self) -> IntParser {
        match self {
            NumericStrategy::Standard => standard::parse_int,
            NumericStrategy::FastApprox => fast::parse_int,
            NumericStrategy::Grammar => grammar::parse_int,
            NumericStrategy::Naive => naive::parse_int,
        }
    }

    pub fn double_parser(self) -> DoubleParser {
        match self {
            NumericStrategy::Standard => standard::parse_double,
            NumericStrategy::FastApprox => fast::parse_double,
            NumericStrategy::Grammar => grammar::parse_double,
            NumericStrategy::Naive => naive::parse_double,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NumericStrategy::Standard => "standard",
            NumericStrategy::FastApprox => "fast",
            NumericStrategy::Grammar => "grammar",
            NumericStrategy::Naive => "naive",
        }
    }

    /// True when doubles are guaranteed bit-identical to `Standard`.
    pub fn is_exact(self) -> bool {
        matches!(self, NumericStrategy::Standard | NumericStrategy::Grammar)
    }
}

impl FromStr for NumericStrategy {
    type Err = ReadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "strtod" | "strtol" => Ok(NumericStrategy::Standard),
            "fast" | "fast_atof" => Ok(NumericStrategy::FastApprox),
            "grammar" | "qi" => Ok(NumericStrategy::Grammar),
            "naive" => Ok(NumericStrategy::Naive),
            _ => Err(ReadError::InvalidDialect(format!(
                "unknown numeric strategy '{}'",
                s
            ))),
        }
    }
}

/// Strips leading and trailing spaces and tabs.
#[inline]
pub(crate) fn trim_blanks(bytes: &[u8]) -> &[u8] {
    let is_blank = |b: &u8| *b == b' ' || *b == b'\t';
    let start = bytes.iter().position(|b| !is_blank(b)).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !is_blank(b)).map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Recognises `inf`, `infinity` and `nan` in any case, with an optional sign.
pub(crate) fn parse_special(bytes: &[u8]) -> Option<f64> {
    let (negative, body) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let value = if body.eq_ignore_ascii_case(b"inf") || body.eq_ignore_ascii_case(b"infinity") {
        f64::INFINITY
    } else if body.eq_ignore_ascii_case(b"nan") {
        f64::NAN
    } else {
        return None;
    };

    Some(if negative { -value } else { value })
}

/// Narrows an accumulated magnitude to `i32`, rejecting the sentinel.
#[inline]
pub(crate) fn narrow_int(value: i64) -> Option<i32> {
    i32::try_from(value).ok().filter(|&v| v != NA_INTEGER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_blanks_strips_both_ends() {
        assert_eq!(trim_blanks(b"  12\t"), b"12");
        assert_eq!(trim_blanks(b"   "), b"");
        assert_eq!(trim_blanks(b""), b"");
        assert_eq!(trim_blanks(b"a b"), b"a b");
    }

    #[test]
    fn narrow_int_rejects_sentinel_and_overflow() {
        assert_eq!(narrow_int(7), Some(7));
        assert_eq!(narrow_int(i32::MIN as i64), None);
        assert_eq!(narrow_int(i32::MAX as i64 + 1), None);
        assert_eq!(narrow_int(i32::MIN as i64 + 1), Some(-2147483647));
    }

    #[test]
    fn recognises_special_values() {
        assert_eq!(parse_special(b"-Inf"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_special(b"INFINITY"), Some(f64::INFINITY));
        assert!(parse_special(b"nan").unwrap().is_nan());
        assert_eq!(parse_special(b"infinite"), None);
    }

    #[test]
    fn default_strategy_is_grammar() {
        assert_eq!(NumericStrategy::default(), NumericStrategy::Grammar);
        assert!(NumericStrategy::default().is_exact());
    }

    #[test]
    fn parses_strategy_names() {
        assert_eq!("qi".parse::<NumericStrategy>().unwrap(), NumericStrategy::Grammar);
        assert_eq!(
            "fast_atof".parse::<NumericStrategy>().unwrap(),
            NumericStrategy::FastApprox
        );
        assert!("simd".parse::<NumericStrategy>().is_err());
    }

    #[test]
    fn every_strategy_agrees_on_plain_integers() {
        for input in ["0", "7", "-15", "+42", "2147483647", "-2147483647", "000123"] {
            let expected = standard::parse_int(input.as_bytes());
            for strategy in NumericStrategy::ALL {
                assert_eq!(
                    strategy.int_parser()(input.as_bytes()),
                    expected,
                    "{} disagrees on {:?}",
                    strategy.name(),
                    input
                );
            }
        }
    }

    #[test]
    fn every_strategy_rejects_garbage() {
        for input in ["", "abc", "1x", "--1", "+", "1 2"] {
            for strategy in NumericStrategy::ALL {
                assert_eq!(strategy.int_parser()(input.as_bytes()), None, "{}", input);
                assert!(strategy.double_parser()(input.as_bytes()).is_none(), "{}", input);
            }
        }
    }
}
