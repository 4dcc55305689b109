use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, result_of, row_headers, scalar_text};

/// Print the result as a field/value table followed by one table per row set
/// (projection schedule, goal cashflows, sensitivity points).
pub fn print_table(value: &Value) {
    match result_of(value) {
        Value::Object(map) => {
            let flat = flatten(map);
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in &flat.fields {
                builder.push_record([key.clone(), scalar_text(val)]);
            }
            println!("{}", Table::from(builder));

            for (name, rows) in &flat.tables {
                println!("\n{name}:");
                print_rows(rows);
            }
        }
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", scalar_text(other)),
    }

    let Some(envelope) = value.as_object() else {
        return;
    };
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }
    let headers = row_headers(rows);
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(h.as_str()).map(scalar_text).unwrap_or_default())
            .collect();
        builder.push_record(cells);
    }
    println!("{}", Table::from(builder));
}
