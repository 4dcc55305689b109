use serde_json::Value;

use super::{flatten, result_of, scalar_text};

/// Headline figures, most specific first. Plan output answers with the
/// monthly SIP still needed; quick commands with their single number.
const HEADLINE_KEYS: [&str; 7] = [
    "gap.required_sip",
    "corpus.total_fv_required",
    "monthly_sip",
    "future_value",
    "present_value",
    "fi_number_buffered",
    "coast_number",
];

/// Print just the headline number from the output.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);
    let Value::Object(map) = result else {
        println!("{}", scalar_text(result));
        return;
    };

    let flat = flatten(map);
    for key in HEADLINE_KEYS {
        if let Some((_, val)) = flat.fields.iter().find(|(k, v)| k == key && !v.is_null()) {
            println!("{}", scalar_text(val));
            return;
        }
    }

    if let Some((key, val)) = flat.fields.first() {
        println!("{}: {}", key, scalar_text(val));
    } else if let Some((name, rows)) = flat.tables.first() {
        println!("{}: {} rows", name, rows.len());
    }
}
