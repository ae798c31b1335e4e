//! # Configuration Module
//!
//! Centralizes the constants that define the default dialect, the missing-value
//! sentinels written by the column decoders, and the precision contract of the
//! approximate floating-point converter. Values that depend on each other live
//! side by side and their relationships are checked at compile time.
//!
//! ## Module Organization
//!
//! - [`constants`]: All configuration values with dependency documentation
//!
//! Runtime configuration (per-parse dialect, header handling, conversion
//! strategies) lives in `ReaderBuilder`.

pub mod constants;
pub use constants::*;
