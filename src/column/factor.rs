//! # Factor Encoding
//!
//! A factor column stores each distinct string once, in a level dictionary,
//! and a 1-based integer code per row:
//!
//! ```text
//! rows:   red  blue  red  green
//! codes:   1    2     1    3
//! levels: ["red", "blue", "green"]      code k <-> levels[k - 1]
//! ```
//!
//! Codes are assigned in order of first appearance. The lookup table is
//! keyed on the decoded bytes of the field and lives only as long as the
//! column's decoder.

use hashbrown::HashMap;

use crate::config::NA_INTEGER;

/// Finalized factor column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Factor {
    codes: Vec<i32>,
    levels: Vec<String>,
}

impl Factor {
    pub fn new(codes: Vec<i32>, levels: Vec<String>) -> Self {
        Self { codes, levels }
    }

    pub fn codes(&self) -> &[i32] {
        &self.codes
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Highest code in use, equal to the number of levels.
    pub fn max_level(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, code: i32) -> Option<&str> {
        let index = usize::try_from(code).ok()?.checked_sub(1)?;
        self.levels.get(index).map(String::as_str)
    }

    /// Level text of each row.
    pub fn values(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.codes.iter().map(|&code| self.level(code))
    }
}

#[derive(Debug)]
pub struct FactorEncoder {
    codes: Vec<i32>,
    lookup: HashMap<Box<[u8]>, i32>,
    levels: Vec<String>,
    max_level: i32,
}

impl FactorEncoder {
    pub fn new(n: usize) -> Self {
        Self {
            codes: vec![NA_INTEGER; n],
            lookup: HashMap::new(),
            levels: Vec::new(),
            max_level: 0,
        }
    }

    /// Returns the code for `content`, assigning the next one when unseen.
    pub fn encode(&mut self, content: &[u8]) -> i32 {
        if let Some(&code) = self.lookup.get(content) {
            return code;
        }

        self.max_level += 1;
        self.lookup.insert(content.into(), self.max_level);
        self.levels.push(String::from_utf8_lossy(content).into_owned());
        self.max_level
    }

    pub fn set(&mut self, row: usize, content: &[u8]) {
        let code = self.encode(content);
        self.codes[row] = code;
    }

    pub fn max_level(&self) -> i32 {
        self.max_level
    }

    pub fn finish(self) -> Factor {
        Factor::new(self.codes, self.levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_value_gets_code_one() {
        let mut encoder = FactorEncoder::new(3);

        encoder.set(0, b"red");
        encoder.set(1, b"blue");
        encoder.set(2, b"red");

        let factor = encoder.finish();
        assert_eq!(factor.codes(), &[1, 2, 1]);
        assert_eq!(factor.levels(), &["red".to_string(), "blue".to_string()]);
        assert_eq!(factor.max_level(), 2);
    }

    #[test]
    fn codes_stay_in_level_range() {
        let mut encoder = FactorEncoder::new(6);
        for (row, value) in ["a", "b", "a", "c", "b", "a"].iter().enumerate() {
            encoder.set(row, value.as_bytes());
        }
        let max = encoder.max_level();
        let factor = encoder.finish();

        assert_eq!(max, 3);
        assert!(factor.codes().iter().all(|&c| c >= 1 && c <= max));
        assert_eq!(factor.levels().len() as i32, max);
        for (code, level) in factor.codes().iter().zip(["a", "b", "a", "c", "b", "a"]) {
            assert_eq!(factor.level(*code), Some(level));
        }
    }

    #[test]
    fn empty_string_is_a_level() {
        let mut encoder = FactorEncoder::new(2);
        encoder.set(0, b"");
        encoder.set(1, b"x");

        let factor = encoder.finish();
        assert_eq!(factor.level(1), Some(""));
        assert_eq!(factor.level(0), None);
        assert_eq!(factor.level(3), None);
    }

    #[test]
    fn values_follow_codes() {
        let factor = Factor::new(vec![2, 1], vec!["lo".into(), "hi".into()]);

        assert_eq!(factor.values().collect::<Vec<_>>(), vec![Some("hi"), Some("lo")]);
    }
}
