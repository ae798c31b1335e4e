//! Bare digit accumulation for inputs known to be well formed.
//!
//! Accepts `[+-]?digits` for integers and `[+-]?digits[.digits]` for
//! doubles. No blanks, exponents or special values. The fractional part is
//! applied with a single division by a power of ten.

use super::narrow_int;
use crate::config::MAX_EXACT_POW10;

pub fn parse_int(bytes: &[u8]) -> Option<i32> {
    let (negative, digits) = split_sign(bytes);
    if digits.is_empty() {
        return None;
    }

    let mut value: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
    }

    narrow_int(if negative { -value } else { value })
}

pub fn parse_double(bytes: &[u8]) -> Option<f64> {
    let (negative, rest) = split_sign(bytes);
    let (int_part, frac_part) = match rest.iter().position(|&b| b == b'.') {
        Some(dot) => (&rest[..dot], &rest[dot + 1..]),
        None => (rest, &rest[rest.len()..]),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut mantissa = 0.0f64;
    for &b in int_part.iter().chain(frac_part) {
        if !b.is_ascii_digit() {
            return None;
        }
        mantissa = mantissa * 10.0 + f64::from(b - b'0');
    }

    let value = if frac_part.len() <= MAX_EXACT_POW10 {
        mantissa / 10f64.powi(frac_part.len() as i32)
    } else {
        mantissa / 10f64.powf(frac_part.len() as f64)
    };

    Some(if negative { -value } else { value })
}

#[inline]
fn split_sign(bytes: &[u8]) -> (bool, &[u8]) {
    match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_int(b"-42"), Some(-42));
        assert_eq!(parse_double(b"3.25"), Some(3.25));
        assert_eq!(parse_double(b"-7"), Some(-7.0));
        assert_eq!(parse_double(b"0.1"), Some(0.1));
    }

    #[test]
    fn rejects_blanks() {
        assert_eq!(parse_int(b" 1"), None);
        assert_eq!(parse_double(b"1.0 "), None);
    }

    #[test]
    fn rejects_exponent_and_specials() {
        assert_eq!(parse_double(b"1e3"), None);
        assert_eq!(parse_double(b"inf"), None);
    }

    #[test]
    fn rejects_lone_dot_and_sign() {
        assert_eq!(parse_double(b"."), None);
        assert_eq!(parse_double(b"-"), None);
        assert_eq!(parse_int(b"+"), None);
    }

    #[test]
    fn integer_overflow_is_rejected() {
        assert_eq!(parse_int(b"99999999999999999999"), None);
        assert_eq!(parse_int(b"-2147483648"), None);
    }
}
