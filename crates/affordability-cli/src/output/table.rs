use serde_json::{Map, Value};
use std::fmt::Write;
use tabled::{builder::Builder, Table};

use super::scalar_text;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    print!("{}", render_table(value));
}

/// Render a result as text tables: scalar fields first, then one table per
/// nested list (ladder rows, sheet sections), then warnings and methodology.
pub fn render_table(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Object(envelope) => match envelope.get("result") {
            Some(result) => {
                render_section(&mut out, None, result);
                render_envelope_notes(&mut out, envelope);
            }
            None => render_section(&mut out, None, value),
        },
        Value::Array(arr) => render_array(&mut out, None, arr),
        _ => {
            let _ = writeln!(out, "{}", scalar_text(value));
        }
    }
    out
}

fn render_section(out: &mut String, title: Option<&str>, value: &Value) {
    match value {
        Value::Object(map) => render_object(out, title, map),
        Value::Array(arr) => render_array(out, title, arr),
        _ => {
            if let Some(t) = title {
                let _ = write!(out, "{}: ", t);
            }
            let _ = writeln!(out, "{}", scalar_text(value));
        }
    }
}

fn render_object(out: &mut String, title: Option<&str>, map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut has_scalars = false;
    let mut nested: Vec<(&str, &Value)> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Object(_) => nested.push((key.as_str(), val)),
            Value::Array(arr) if arr.iter().any(Value::is_object) => {
                nested.push((key.as_str(), val))
            }
            Value::Array(arr) => {
                let items: Vec<String> = arr.iter().map(scalar_text).collect();
                builder.push_record([key.clone(), items.join(", ")]);
                has_scalars = true;
            }
            _ => {
                builder.push_record([key.clone(), scalar_text(val)]);
                has_scalars = true;
            }
        }
    }

    if has_scalars {
        push_title(out, title);
        let _ = writeln!(out, "{}", Table::from(builder));
    }
    for (key, val) in nested {
        render_section(out, Some(key), val);
    }
}

fn render_array(out: &mut String, title: Option<&str>, arr: &[Value]) {
    push_title(out, title);
    if arr.is_empty() {
        let _ = writeln!(out, "(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(headers.clone());

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        let _ = writeln!(out, "{}", Table::from(builder));
    } else {
        for item in arr {
            let _ = writeln!(out, "{}", scalar_text(item));
        }
    }
}

fn push_title(out: &mut String, title: Option<&str>) {
    if let Some(t) = title {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", t.replace('_', " "));
    }
}

fn render_envelope_notes(out: &mut String, envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            let _ = writeln!(out, "\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    let _ = writeln!(out, "  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        let _ = writeln!(out, "\nMethodology: {}", meth);
    }
}
