pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Schedule columns in display order: (JSON key, table header).
pub const SCHEDULE_COLUMNS: [(&str, &str); 5] = [
    ("month_number", "Month #"),
    ("payment", "Mortgage"),
    ("principal", "Principal"),
    ("interest", "Interest"),
    ("balance", "Balance"),
];

/// Summary fields in display order: (JSON key, label).
pub const SUMMARY_FIELDS: [(&str, &str); 4] = [
    ("home_value", "Home Value"),
    ("monthly_mortgage", "Monthly Mortgage"),
    ("total_payment", "Total Payment"),
    ("total_interest", "Total Interest"),
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// The `result` object of an envelope, or the value itself.
pub fn result_of(value: &Value) -> &Value {
    value.get("result").unwrap_or(value)
}

/// Validation messages carried by a result, if any.
pub fn messages(value: &Value) -> Vec<&str> {
    result_of(value)
        .get("messages")
        .and_then(Value::as_array)
        .map(|msgs| msgs.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Whether the result reports validation failures.
pub fn has_messages(value: &Value) -> bool {
    !messages(value).is_empty()
}

/// Render a scalar for text output.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
