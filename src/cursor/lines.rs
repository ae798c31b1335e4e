//! Row-count discovery used to pre-size column storage.

use memchr::memchr2_iter;

use super::{Cursor, Dialect};
use crate::error::ReadError;

/// Counts physical lines. `\n`, `\r\n` and a lone `\r` each end one line; a
/// final line without a terminator still counts. Quotes are not interpreted.
pub fn count_lines(bytes: &[u8]) -> usize {
    let mut lines = 0;
    let mut line_start = 0;

    for idx in memchr2_iter(b'\n', b'\r', bytes) {
        if bytes[idx] == b'\n' && idx > 0 && bytes[idx - 1] == b'\r' {
            line_start = idx + 1;
            continue;
        }
        lines += 1;
        line_start = idx + 1;
    }

    if line_start < bytes.len() {
        lines += 1;
    }

    lines
}

/// 1-based physical record number of the byte at `offset`, counting only
/// complete lines before it.
pub fn record_at(bytes: &[u8], offset: usize) -> usize {
    let prefix = &bytes[..offset.min(bytes.len())];
    let open_line = prefix.last().is_some_and(|&b| b != b'\n' && b != b'\r');

    count_lines(prefix) - usize::from(open_line) + 1
}

/// Counts records from `offset` to the end, honouring quotes so that embedded
/// newlines do not start a new record.
pub fn count_records(bytes: &[u8], dialect: Dialect, offset: usize) -> Result<usize, ReadError> {
    let mut cursor = Cursor::with_position(bytes, dialect, offset, 1);
    let mut records = 0;

    while !cursor.is_eof() {
        cursor.skip_record()?;
        records += 1;
    }

    Ok(records)
}
