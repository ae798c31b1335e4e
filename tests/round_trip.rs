//! # Round Trip
//!
//! Reading a file, writing the table back with the same dialect and reading
//! that output again must reproduce the table. Unquoted input fields are
//! reproduced byte for byte.

use std::io::Write;

use tempfile::NamedTempFile;
use typedcsv::{write_csv, write_csv_with_header, ColumnType, Dialect, Reader};

const SCHEMA: [ColumnType; 4] = [
    ColumnType::Integer,
    ColumnType::String,
    ColumnType::Factor,
    ColumnType::Double,
];

#[test]
fn unquoted_input_is_reproduced_byte_for_byte() {
    let input = "1,alpha,red,0.5\n2,beta,blue,-3.25\n3,gamma,red,1000\n";
    let mut reader = Reader::from_bytes(input.as_bytes().to_vec()).unwrap();
    let table = reader.read_table(3, &SCHEMA).unwrap();

    let mut out = Vec::new();
    write_csv(&table, Dialect::default(), &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), input);
}

#[test]
fn quoted_input_is_reproduced_equivalently() {
    let input = b"1,\"a,b\",\"x\ny\",NA\n2,\"say \\\"hi\\\"\",plain,7.5\n";
    let table = Reader::from_bytes(input.to_vec())
        .unwrap()
        .read_table(2, &SCHEMA)
        .unwrap();

    let mut out = Vec::new();
    write_csv(&table, Dialect::default(), &mut out).unwrap();
    let again = Reader::from_bytes(out.clone())
        .unwrap()
        .read_table(2, &SCHEMA)
        .unwrap();

    assert_eq!(again.get(0), table.get(0));
    assert_eq!(again.get(1), table.get(1));
    assert_eq!(again.get(2), table.get(2));
    let doubles = again.get(3).unwrap().as_doubles().unwrap();
    assert!(doubles[0].is_nan());
    assert_eq!(doubles[1], 7.5);
    assert!(String::from_utf8(out).unwrap().contains("\"say \"\"hi\"\"\""));
}

#[test]
fn header_and_row_labels_survive_a_file_round_trip() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"\tname\tscore\nr1\tann\t1.5\nr2\tbob\t2\n").unwrap();
    file.flush().unwrap();
    let schema = [ColumnType::RowLabel, ColumnType::String, ColumnType::Double];
    let dialect = Dialect::new(b'\t', b'"', b'"');

    let table = Reader::builder()
        .dialect(dialect)
        .has_header(true)
        .open(file.path())
        .unwrap()
        .read_table(2, &schema)
        .unwrap();

    let mut out = NamedTempFile::new().unwrap();
    write_csv_with_header(&table, dialect, out.as_file_mut()).unwrap();

    let again = Reader::builder()
        .dialect(dialect)
        .has_header(true)
        .open(out.path())
        .unwrap()
        .read_table(2, &schema)
        .unwrap();

    assert_eq!(again, table);
    assert_eq!(
        again.row_names().unwrap(),
        &["r1".to_string(), "r2".to_string()]
    );
}
