//! # Column Type Tags
//!
//! The schema is an ordered list of [`ColumnType`] tags, one per input
//! column. Tags arrive either as small integers or as type names:
//!
//! | Tag | Name(s) | Output |
//! |-----|---------|--------|
//! | 0 | `integer`, `int` | `Vec<i32>`, missing = `i32::MIN` |
//! | 1 | `double`, `numeric` | `Vec<f64>`, missing = NaN |
//! | 2 | `factor` | codes + levels |
//! | 3 | `character`, `string` | `Vec<String>` |
//! | 4 | `rownames` | row labels, not a column |
//! | 5 | `NULL`, `skip` | nothing |
//!
//! Any other tag or name is a configuration error.

use std::fmt;
use std::str::FromStr;

use crate::error::ReadError;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer = 0,
    Double = 1,
    Factor = 2,
    String = 3,
    RowLabel = 4,
    Skip = 5,
}

impl ColumnType {
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Double => "double",
            ColumnType::Factor => "factor",
            ColumnType::String => "character",
            ColumnType::RowLabel => "rownames",
            ColumnType::Skip => "NULL",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Double)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ColumnType {
    type Error = ReadError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ColumnType::Integer),
            1 => Ok(ColumnType::Double),
            2 => Ok(ColumnType::Factor),
            3 => Ok(ColumnType::String),
            4 => Ok(ColumnType::RowLabel),
            5 => Ok(ColumnType::Skip),
            _ => Err(ReadError::UnknownColumnType(value.to_string())),
        }
    }
}

impl FromStr for ColumnType {
    type Err = ReadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" | "int" => Ok(ColumnType::Integer),
            "double" | "numeric" => Ok(ColumnType::Double),
            "factor" => Ok(ColumnType::Factor),
            "character" | "string" => Ok(ColumnType::String),
            "rownames" => Ok(ColumnType::RowLabel),
            "NULL" | "skip" => Ok(ColumnType::Skip),
            _ => Err(ReadError::UnknownColumnType(s.to_string())),
        }
    }
}

/// Resolves a schema given as type names.
pub fn parse_schema<S: AsRef<str>>(names: &[S]) -> Result<Vec<ColumnType>, ReadError> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

/// Resolves a schema given as integer tags.
pub fn schema_from_tags(tags: &[u8]) -> Result<Vec<ColumnType>, ReadError> {
    tags.iter().map(|&tag| ColumnType::try_from(tag)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_discriminant() {
        for ty in [
            ColumnType::Integer,
            ColumnType::Double,
            ColumnType::Factor,
            ColumnType::String,
            ColumnType::RowLabel,
            ColumnType::Skip,
        ] {
            assert_eq!(ColumnType::try_from(ty as u8).unwrap(), ty);
            assert_eq!(ty.name().parse::<ColumnType>().unwrap(), ty);
        }
    }

    #[test]
    fn unknown_tag_is_configuration_error() {
        let err = ColumnType::try_from(9).unwrap_err();

        assert_eq!(err, ReadError::UnknownColumnType("9".into()));
        assert!(!err.is_structural());
    }

    #[test]
    fn parses_schema_names() {
        let schema = parse_schema(&["numeric", "string", "skip"]).unwrap();

        assert_eq!(
            schema,
            vec![ColumnType::Double, ColumnType::String, ColumnType::Skip]
        );
    }

    #[test]
    fn unknown_name_fails_whole_schema() {
        let err = parse_schema(&["integer", "date"]).unwrap_err();

        assert_eq!(err, ReadError::UnknownColumnType("date".into()));
    }

    #[test]
    fn schema_from_integer_tags() {
        assert_eq!(
            schema_from_tags(&[5, 2, 0]).unwrap(),
            vec![ColumnType::Skip, ColumnType::Factor, ColumnType::Integer]
        );
        assert!(schema_from_tags(&[0, 6]).is_err());
    }
}
