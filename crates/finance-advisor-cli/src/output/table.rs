use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::cell;

/// Columns shown for arrays of recommendations; other arrays use every key.
const RECOMMENDATION_COLUMNS: [&str; 5] =
    ["priority", "title", "category", "suggested_amount", "timeframe"];

/// Print output as tables: scalars as a Field/Value table, nested objects
/// and arrays as their own titled sections.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_section(None, result);
                print_envelope_notes(map);
            } else {
                print_section(None, value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", cell(value)),
    }
}

fn print_section(title: Option<&str>, value: &Value) {
    if let Some(t) = title {
        println!("\n{}", t.bold());
    }
    match value {
        Value::Object(map) => print_object(map),
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", cell(value)),
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested = Vec::new();
    let mut rows = 0;

    for (key, val) in map {
        match val {
            Value::Object(_) | Value::Array(_) if !is_scalar_list(val) => nested.push((key, val)),
            _ => {
                builder.push_record([key.as_str(), &cell(val)]);
                rows += 1;
            }
        }
    }

    if rows > 0 {
        println!("{}", Table::from(builder));
    }
    for (key, val) in nested {
        print_section(Some(key), val);
    }
}

fn is_scalar_list(value: &Value) -> bool {
    matches!(value, Value::Array(items) if items.iter().all(|v| !v.is_object() && !v.is_array()))
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", cell(item));
        }
        return;
    };

    let headers: Vec<String> = if first.contains_key("action_steps") {
        RECOMMENDATION_COLUMNS.iter().map(|s| s.to_string()).collect()
    } else {
        first.keys().cloned().collect()
    };

    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(cell).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
