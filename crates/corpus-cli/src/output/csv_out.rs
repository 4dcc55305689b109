use serde_json::Value;
use std::io;

use super::{flatten, result_of, row_headers, scalar_text};

/// Row sets preferred for CSV, in order: year-by-year projection, then
/// sensitivity points.
const ROW_KEYS: [&str; 2] = ["projection", "results"];

/// Write output as CSV to stdout.
///
/// Plans emit the projection schedule, sensitivity runs emit one row per
/// value; anything else becomes a two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Object(map) => {
            let rows = ROW_KEYS
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_array));
            match rows {
                Some(rows) => write_rows(&mut wtr, rows),
                None => {
                    let _ = wtr.write_record(["field", "value"]);
                    for (key, val) in flatten(map).fields {
                        let _ = wtr.write_record([key, scalar_text(val)]);
                    }
                }
            }
        }
        Value::Array(rows) => write_rows(&mut wtr, rows),
        other => {
            let _ = wtr.write_record([scalar_text(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let headers = row_headers(rows);
    if headers.is_empty() {
        for row in rows {
            let _ = wtr.write_record([scalar_text(row)]);
        }
        return;
    }
    let _ = wtr.write_record(&headers);
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(h.as_str()).map(scalar_text).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&cells);
    }
}
