use serde_json::Value;
use std::io;

use super::scalar_text;

/// Write output as CSV to stdout.
///
/// Objects become `field,value` rows with nested fields flattened to
/// dotted paths (`amortization.0.loan_term`); a top-level array of
/// objects becomes one row per element.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match body {
        Value::Array(arr) if arr.iter().all(Value::is_object) && !arr.is_empty() => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record(["field", "value"]);
            let mut rows = Vec::new();
            flatten_value("", body, &mut rows);
            for (field, val) in rows {
                let _ = wtr.write_record([field, val]);
            }
        }
    }

    let _ = wtr.flush();
}

/// Flatten nested JSON into (dotted path, scalar text) pairs.
pub fn flatten_value(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };

    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_value(&join(key), val, rows);
            }
        }
        Value::Array(arr) => {
            for (i, val) in arr.iter().enumerate() {
                flatten_value(&join(&i.to_string()), val, rows);
            }
        }
        _ => rows.push((prefix.to_string(), scalar_text(value))),
    }
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
