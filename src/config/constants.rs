//! # Configuration Constants
//!
//! This module groups the constants shared by the cursor, the numeric
//! converters and the column decoders.
//!
//! ## Dependency Graph
//!
//! ```text
//! DEFAULT_SEPARATOR (',')  DEFAULT_QUOTE ('"')  DEFAULT_ESCAPE ('\\')
//!       │                        │                     │
//!       └──────── must be pairwise distinct from ──────┘
//!                   '\n' and '\r' (row terminators)
//!                   separator != quote, separator != escape
//!
//! NA_INTEGER (i32::MIN)
//!       │
//!       └─> integer converters reject i32::MIN so a parsed value can never
//!           be mistaken for a missing cell
//!
//! FAST_ATOF_MAX_SIGNIFICANT_DIGITS (19)
//!       │
//!       └─> FAST_ATOF_MAX_RELATIVE_ERROR (1e-12)
//!             digits past the 19th are dropped, which alone costs at most
//!             ~1e-18 relative error; the rest of the budget covers the
//!             chained power-of-ten scaling
//! ```
//!
//! ## Critical Invariants
//!
//! 1. Default dialect bytes are distinct and are not row terminators
//! 2. `FAST_ATOF_MAX_SIGNIFICANT_DIGITS` fits an exact `u64` accumulator

// ============================================================================
// DIALECT DEFAULTS
// ============================================================================

/// Default field separator.
pub const DEFAULT_SEPARATOR: u8 = b',';

/// Default quote byte.
pub const DEFAULT_QUOTE: u8 = b'"';

/// Default escape byte. Inside a quoted field, `\"` is a literal quote.
pub const DEFAULT_ESCAPE: u8 = b'\\';

const _: () = assert!(
    DEFAULT_SEPARATOR != DEFAULT_QUOTE && DEFAULT_SEPARATOR != DEFAULT_ESCAPE,
    "default separator must differ from quote and escape"
);

const _: () = assert!(
    !is_row_terminator(DEFAULT_SEPARATOR)
        && !is_row_terminator(DEFAULT_QUOTE)
        && !is_row_terminator(DEFAULT_ESCAPE),
    "default dialect bytes must not be row terminators"
);

/// Returns true for the bytes that can end a record.
#[inline]
pub const fn is_row_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

// ============================================================================
// MISSING-VALUE SENTINELS
// ============================================================================

/// Stored in integer columns (and factor code columns) for cells that could
/// not be converted.
pub const NA_INTEGER: i32 = i32::MIN;

/// Stored in double columns for cells that could not be converted.
pub const NA_DOUBLE: f64 = f64::NAN;

/// Text written by the CSV writer for a missing numeric cell.
pub const NA_TEXT: &str = "NA";

// ============================================================================
// NUMERIC CONVERSION
// ============================================================================

/// Significant digits honoured by the approximate double converter.
/// 10^19 - 1 < 2^64, so the mantissa accumulates exactly in a `u64`.
pub const FAST_ATOF_MAX_SIGNIFICANT_DIGITS: usize = 19;

/// Documented worst-case relative error of the approximate double converter
/// for results in the normal `f64` range.
pub const FAST_ATOF_MAX_RELATIVE_ERROR: f64 = 1e-12;

const _: () = assert!(
    FAST_ATOF_MAX_SIGNIFICANT_DIGITS <= 19,
    "approximate converter mantissa must fit a u64"
);

/// Largest power of ten exactly representable as an `f64`.
pub const MAX_EXACT_POW10: usize = 22;

// ============================================================================
// OUTPUT NAMING
// ============================================================================

/// Prefix for generated column names when the input has no header (`V1`, `V2`, ...).
pub const DEFAULT_COLUMN_PREFIX: &str = "V";
