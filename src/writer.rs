//! # CSV Writer
//!
//! Serializes a [`Table`] back to delimited text in a given [`Dialect`], so
//! that reading the output with the same dialect and schema reproduces the
//! table.
//!
//! ## Field Encoding
//!
//! | Content | Written as |
//! |---------|------------|
//! | no separator, quote or newline | verbatim |
//! | otherwise | quoted, embedded quotes doubled |
//! | missing integer or double | `NA` |
//! | factor code | its level text |
//!
//! Row labels, when present, are written as the first field of each record.
//! Records end with `\n`.
//!
//! When the escape byte differs from the quote byte, content in which the
//! escape byte is followed by a quote, or ends the field, has no encoding the
//! reader would decode back to the same bytes. Writing such a table fails.

use std::io::Write;

use eyre::{bail, ensure, Result, WrapErr};

use crate::column::{Column, Table};
use crate::config::NA_TEXT;
use crate::cursor::Dialect;

/// Writes the records of `table`.
pub fn write_csv<W: Write>(table: &Table, dialect: Dialect, out: W) -> Result<()> {
    write_table(table, dialect, false, out)
}

/// Writes a header record of column names followed by the records of
/// `table`. A row-label column gets an empty name.
pub fn write_csv_with_header<W: Write>(table: &Table, dialect: Dialect, out: W) -> Result<()> {
    write_table(table, dialect, true, out)
}

fn write_table<W: Write>(table: &Table, dialect: Dialect, header: bool, mut out: W) -> Result<()> {
    dialect.validate()?;

    let row_names = table.row_names();
    for named in table.columns() {
        ensure!(
            named.column.len() == table.n_rows(),
            "column '{}' has {} values, table has {} rows",
            named.name,
            named.column.len(),
            table.n_rows()
        );
    }

    let mut line = Vec::new();

    if header {
        let mut fields: Vec<&[u8]> = Vec::with_capacity(table.n_cols() + 1);
        if row_names.is_some() {
            fields.push(b"");
        }
        fields.extend(table.names().map(str::as_bytes));
        encode_record(&mut line, fields.into_iter(), &dialect)?;
        out.write_all(&line).wrap_err("failed to write header")?;
    }

    let mut cell = Vec::new();
    for row in 0..table.n_rows() {
        line.clear();
        let mut first = true;

        if let Some(labels) = row_names {
            let label = labels.get(row).map(String::as_bytes).unwrap_or_default();
            encode_field(&mut line, label, &dialect)?;
            first = false;
        }

        for named in table.columns() {
            if !first {
                line.push(dialect.separator);
            }
            first = false;

            cell.clear();
            format_cell(&mut cell, &named.column, row);
            encode_field(&mut line, &cell, &dialect)
                .wrap_err_with(|| format!("column '{}', row {}", named.name, row + 1))?;
        }

        line.push(b'\n');
        out.write_all(&line)
            .wrap_err_with(|| format!("failed to write record {}", row + 1))?;
    }

    out.flush().wrap_err("failed to flush output")?;

    tracing::debug!(
        rows = table.n_rows(),
        columns = table.n_cols(),
        header,
        "table written"
    );

    Ok(())
}

fn encode_record<'a>(
    line: &mut Vec<u8>,
    fields: impl Iterator<Item = &'a [u8]>,
    dialect: &Dialect,
) -> Result<()> {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            line.push(dialect.separator);
        }
        encode_field(line, field, dialect)?;
    }
    line.push(b'\n');
    Ok(())
}

fn format_cell(cell: &mut Vec<u8>, column: &Column, row: usize) {
    if column.is_missing(row) {
        cell.extend_from_slice(NA_TEXT.as_bytes());
        return;
    }

    match column {
        Column::Integer(values) => {
            let _ = write!(cell, "{}", values[row]);
        }
        Column::Double(values) => {
            let _ = write!(cell, "{}", values[row]);
        }
        Column::Factor(factor) => match factor.level(factor.codes()[row]) {
            Some(level) => cell.extend_from_slice(level.as_bytes()),
            None => cell.extend_from_slice(NA_TEXT.as_bytes()),
        },
        Column::String(values) => cell.extend_from_slice(values[row].as_bytes()),
    }
}

fn encode_field(line: &mut Vec<u8>, content: &[u8], dialect: &Dialect) -> Result<()> {
    let Dialect {
        quote, escape, ..
    } = *dialect;

    if escape != quote {
        let trailing = content.last() == Some(&escape);
        let before_quote = content.windows(2).any(|w| w[0] == escape && w[1] == quote);
        if trailing || before_quote {
            bail!(
                "field {:?} cannot be written: escape byte {:?} before a quote or at the end",
                String::from_utf8_lossy(content),
                escape as char
            );
        }
    }

    if !dialect.needs_quoting(content) {
        line.extend_from_slice(content);
        return Ok(());
    }

    line.push(quote);
    for &b in content {
        if b == quote {
            line.push(quote);
        }
        line.push(b);
    }
    line.push(quote);

    Ok(())
}
