//! Fuzz testing for the reader.
//!
//! Arbitrary bytes, dialects and schemas are pushed through the whole
//! pipeline. Every input must either decode or fail with an error; it must
//! never panic, and a decoded table must have the requested shape.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use typedcsv::{ColumnType, Dialect, NumericStrategy, Reader};

#[derive(Debug, Arbitrary)]
struct ReaderInput {
    separator: u8,
    quote: u8,
    escape: u8,
    has_header: bool,
    strategy: FuzzStrategy,
    schema: Vec<FuzzColumnType>,
    rows: u8,
    data: Vec<u8>,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzColumnType {
    Integer,
    Double,
    Factor,
    String,
    RowLabel,
    Skip,
}

impl From<FuzzColumnType> for ColumnType {
    fn from(ty: FuzzColumnType) -> Self {
        match ty {
            FuzzColumnType::Integer => ColumnType::Integer,
            FuzzColumnType::Double => ColumnType::Double,
            FuzzColumnType::Factor => ColumnType::Factor,
            FuzzColumnType::String => ColumnType::String,
            FuzzColumnType::RowLabel => ColumnType::RowLabel,
            FuzzColumnType::Skip => ColumnType::Skip,
        }
    }
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzStrategy {
    Standard,
    FastApprox,
    Grammar,
    Naive,
}

impl From<FuzzStrategy> for NumericStrategy {
    fn from(s: FuzzStrategy) -> Self {
        match s {
            FuzzStrategy::Standard => NumericStrategy::Standard,
            FuzzStrategy::FastApprox => NumericStrategy::FastApprox,
            FuzzStrategy::Grammar => NumericStrategy::Grammar,
            FuzzStrategy::Naive => NumericStrategy::Naive,
        }
    }
}

fuzz_target!(|input: ReaderInput| {
    if input.schema.len() > 64 {
        return;
    }

    let reader = Reader::builder()
        .dialect(Dialect::new(input.separator, input.quote, input.escape))
        .has_header(input.has_header)
        .int_strategy(input.strategy.into())
        .double_strategy(input.strategy.into())
        .from_bytes(input.data);

    let Ok(mut reader) = reader else {
        return;
    };

    let _ = reader.count_lines();
    let rows = match reader.count_rows() {
        Ok(rows) => rows.min(input.rows as usize),
        Err(_) => input.rows as usize,
    };

    let schema: Vec<ColumnType> = input.schema.into_iter().map(Into::into).collect();
    if let Ok(table) = reader.read_table(rows, &schema) {
        assert_eq!(table.n_rows(), rows);
        for named in table.columns() {
            assert_eq!(named.column.len(), rows);
        }
        if let Some(labels) = table.row_names() {
            assert_eq!(labels.len(), rows);
        }
    }
});
