//! # Approximate Converters
//!
//! Hand-rolled accumulation with no fallback to a correctly rounded path.
//!
//! ```text
//! [blank*] [sign] digits [. digits] [(e|E) [sign] digits] [blank*]
//!                 \____________________/
//!                  up to 19 significant digits accumulate into a u64;
//!                  later digits only shift the decimal exponent
//! ```
//!
//! The mantissa is converted to `f64` once and scaled by powers of ten from
//! an exact table, chaining `1e22` steps for larger exponents. Each step
//! rounds, so the result is not always the nearest double. For results in the
//! normal range the relative error stays below
//! [`FAST_ATOF_MAX_RELATIVE_ERROR`](crate::config::FAST_ATOF_MAX_RELATIVE_ERROR).
//!
//! Integers accept at most ten significant digits and are range checked.

use super::{narrow_int, parse_special, trim_blanks};
use crate::config::{FAST_ATOF_MAX_SIGNIFICANT_DIGITS, MAX_EXACT_POW10};

/// Exponents beyond this saturate; the result is 0 or infinity anyway.
const EXPONENT_CAP: i32 = 9_999;

const MAX_INT_DIGITS: usize = 10;

static POW10: [f64; MAX_EXACT_POW10 + 1] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

pub fn parse_int(bytes: &[u8]) -> Option<i32> {
    let bytes = trim_blanks(bytes);
    let (negative, digits) = split_sign(bytes);
    if digits.is_empty() {
        return None;
    }

    let mut value: i64 = 0;
    let mut significant = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        if value == 0 && b == b'0' {
            continue;
        }
        significant += 1;
        if significant > MAX_INT_DIGITS {
            return None;
        }
        value = value * 10 + i64::from(b - b'0');
    }

    narrow_int(if negative { -value } else { value })
}

pub fn parse_double(bytes: &[u8]) -> Option<f64> {
    let bytes = trim_blanks(bytes);
    if let Some(special) = parse_special(bytes) {
        return Some(special);
    }

    let (negative, rest) = split_sign(bytes);
    let mut pos = 0;
    let mut mantissa: u64 = 0;
    let mut significant = 0;
    let mut exponent: i32 = 0;
    let mut any_digit = false;

    while let Some(&b) = rest.get(pos) {
        if !b.is_ascii_digit() {
            break;
        }
        any_digit = true;
        accumulate(b, &mut mantissa, &mut significant, &mut exponent, false);
        pos += 1;
    }

    if rest.get(pos) == Some(&b'.') {
        pos += 1;
        while let Some(&b) = rest.get(pos) {
            if !b.is_ascii_digit() {
                break;
            }
            any_digit = true;
            accumulate(b, &mut mantissa, &mut significant, &mut exponent, true);
            pos += 1;
        }
    }

    if !any_digit {
        return None;
    }

    if matches!(rest.get(pos), Some(b'e') | Some(b'E')) {
        pos += 1;
        let (exp_negative, exp_digits) = split_sign(&rest[pos..]);
        let consumed = exp_digits.iter().take_while(|b| b.is_ascii_digit()).count();
        if consumed == 0 {
            return None;
        }
        let mut exp_value: i32 = 0;
        for &b in &exp_digits[..consumed] {
            exp_value = (exp_value * 10 + i32::from(b - b'0')).min(EXPONENT_CAP);
        }
        exponent += if exp_negative { -exp_value } else { exp_value };
        pos = rest.len() - exp_digits.len() + consumed;
    }

    if pos != rest.len() {
        return None;
    }

    let value = scale(mantissa as f64, exponent);
    Some(if negative { -value } else { value })
}

#[inline]
fn accumulate(
    b: u8,
    mantissa: &mut u64,
    significant: &mut usize,
    exponent: &mut i32,
    fraction: bool,
) {
    if *mantissa == 0 && b == b'0' {
        if fraction {
            *exponent -= 1;
        }
        return;
    }

    if *significant < FAST_ATOF_MAX_SIGNIFICANT_DIGITS {
        *mantissa = *mantissa * 10 + u64::from(b - b'0');
        *significant += 1;
        if fraction {
            *exponent -= 1;
        }
    } else if !fraction {
        *exponent += 1;
    }
}

fn scale(mut value: f64, mut exponent: i32) -> f64 {
    if value == 0.0 {
        return value;
    }

    let step = MAX_EXACT_POW10 as i32;
    while exponent > step {
        value *= POW10[MAX_EXACT_POW10];
        exponent -= step;
        if value.is_infinite() {
            return value;
        }
    }
    while exponent < -step {
        value /= POW10[MAX_EXACT_POW10];
        exponent += step;
        if value == 0.0 {
            return value;
        }
    }

    if exponent >= 0 {
        value * POW10[exponent as usize]
    } else {
        value / POW10[(-exponent) as usize]
    }
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
    use crate::config::FAST_ATOF_MAX_RELATIVE_ERROR;

    fn assert_close(input: &str) {
        let expected: f64 = input.trim().parse().unwrap();
        let actual = parse_double(input.as_bytes()).unwrap();
        let err = ((actual - expected) / expected).abs();
        assert!(
            err <= FAST_ATOF_MAX_RELATIVE_ERROR,
            "{}: got {:e}, expected {:e}, relative error {:e}",
            input,
            actual,
            expected,
            err
        );
    }

    #[test]
    fn simple_values_are_exact() {
        assert_eq!(parse_double(b"3.25"), Some(3.25));
        assert_eq!(parse_double(b"-0.5"), Some(-0.5));
        assert_eq!(parse_double(b"1e3"), Some(1000.0));
        assert_eq!(parse_double(b"0"), Some(0.0));
        assert_eq!(parse_double(b"5."), Some(5.0));
        assert_eq!(parse_double(b".25"), Some(0.25));
    }

    #[test]
    fn values_stay_within_tolerance() {
        for input in [
            "3.141592653589793",
            "2.718281828459045e-5",
            "6.02214076e23",
            "1.602176634e-19",
            "1.2345e300",
            "2.2250738585072014e-308",
            "123456789012345678901234567890",
            "0.000000000000000000000000000123456789",
            "9007199254740993",
        ] {
            assert_close(input);
        }
    }

    #[test]
    fn leading_zeros_do_not_use_significant_digits() {
        assert_close("0.00000000000000000000012345678901234567891");
    }

    #[test]
    fn huge_exponent_saturates() {
        assert_eq!(parse_double(b"1e99999999"), Some(f64::INFINITY));
        assert_eq!(parse_double(b"1e-99999999"), Some(0.0));
    }

    #[test]
    fn rejects_malformed_doubles() {
        assert_eq!(parse_double(b"1e"), None);
        assert_eq!(parse_double(b"."), None);
        assert_eq!(parse_double(b"1.2.3"), None);
        assert_eq!(parse_double(b"e5"), None);
    }

    #[test]
    fn integers_limited_to_ten_digits() {
        assert_eq!(parse_int(b"0000000000012"), Some(12));
        assert_eq!(parse_int(b"2147483647"), Some(i32::MAX));
        assert_eq!(parse_int(b"12345678901"), None);
        assert_eq!(parse_int(b"-2147483648"), None);
    }
}
