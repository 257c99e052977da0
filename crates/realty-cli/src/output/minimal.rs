use serde_json::Value;

use super::scalar_text;

// Headline field of each command, in priority order.
const PRIORITY_KEYS: [&str; 6] = [
    "formatted",
    "emi",
    "rupees",
    "matched_ids",
    "valid",
    "closing_balance",
];

/// Print just the headline value of a command's output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Schedules: the last row tells whether the loan closes out
    let target = match result_obj {
        Value::Array(rows) => rows.last().unwrap_or(result_obj),
        other => other,
    };

    if let Value::Object(map) = target {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
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

    println!("{}", scalar_text(target));
}
