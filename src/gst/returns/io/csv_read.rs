use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::gst::returns::model::Record;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parses comma separated text into header-keyed records.
///
/// The first line is the header row. Input with fewer than two lines yields no
/// records. Fields are trimmed, rows without any content are dropped, short
/// rows are padded with empty values and surplus fields are discarded.
/// Quoting follows the usual CSV rules, so `"a,b"` is a single field and a
/// doubled quote inside a quoted field is a literal quote character.
pub fn parse_records(text: &str) -> Vec<Record> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text).trim();
    if text.lines().nth(1).is_none() {
        return Vec::new();
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let mut rows = reader.records();

    let headers: Vec<String> = match rows.next() {
        Some(Ok(row)) => row.iter().map(str::to_string).collect(),
        Some(Err(error)) => {
            warn!(%error, "unreadable header row, ignoring input");
            return Vec::new();
        }
        None => return Vec::new(),
    };

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(error) => {
                warn!(line = index + 2, %error, "skipping malformed row");
                continue;
            }
        };
        if row.iter().all(str::is_empty) {
            continue;
        }
        records.push(build_record(&headers, &row));
    }

    debug!(
        columns = headers.len(),
        records = records.len(),
        "parsed delimited input"
    );
    records
}

fn build_record(headers: &[String], row: &StringRecord) -> Record {
    let mut record = Record::new();
    for (index, header) in headers.iter().enumerate() {
        record.insert(header.as_str(), row.get(index).unwrap_or(""));
    }
    record
}
