use serde_json::Value;

use super::scalar_text;

/// Fields worth printing on their own, most useful first.
const PRIORITY_KEYS: [&str; 6] = [
    "monthly_payment",
    "loanable_amount",
    "monthly_down_payment",
    "term_years",
    "financing_type",
    "generation",
];

/// Print just the headline value of a result.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    println!("{}", scalar_text(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result_obj));
}
