use serde_json::Value;

use super::cell;

/// Key figures, searched in order at the top of the result and then inside
/// a nested `profile` or `summary` object.
const PRIORITY_KEYS: [&str; 6] = [
    "available_amount",
    "balance",
    "risk_profile",
    "savings",
    "title",
    "progress_pct",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Arrays (recommendations, goal views): one line per item
    if let Value::Array(items) = result {
        for item in items {
            println!("{}", pick(item).unwrap_or_else(|| cell(item)));
        }
        return;
    }

    let found = pick(result)
        .or_else(|| result.get("profile").and_then(pick))
        .or_else(|| result.get("summary").and_then(pick));

    match found {
        Some(s) => println!("{}", s),
        None => println!("{}", cell(result)),
    }
}

fn pick(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    PRIORITY_KEYS
        .iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
        .map(cell)
}
