use serde_json::Value;
use std::io;

use super::cell;

/// Write output as CSV to stdout.
///
/// Objects flatten to `field,value` rows with dotted paths
/// (`profile.available_amount`); arrays of objects become one row each.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match body {
        Value::Array(arr) if arr.iter().all(Value::is_object) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record(["field", "value"]);
            let mut rows = Vec::new();
            flatten("", body, &mut rows);
            for (key, val) in rows {
                let _ = wtr.write_record([key.as_str(), val.as_str()]);
            }
        }
    }

    let _ = wtr.flush();
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
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
                flatten(&join(key), val, rows);
            }
        }
        Value::Array(items) if items.iter().any(|v| v.is_object()) => {
            for (i, item) in items.iter().enumerate() {
                flatten(&join(&i.to_string()), item, rows);
            }
        }
        _ => rows.push((prefix.to_string(), cell(value))),
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(cell).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_paths() {
        let value = json!({
            "profile": {"available_amount": "2200", "risk_profile": "moderate"},
            "recommendations": [{"id": "lifestyle"}],
        });
        let mut rows = Vec::new();
        flatten("", &value, &mut rows);

        assert!(rows.contains(&("profile.available_amount".into(), "2200".into())));
        assert!(rows.contains(&("recommendations.0.id".into(), "lifestyle".into())));
    }
}
