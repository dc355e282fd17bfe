use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_value, messages, result_of, SCHEDULE_COLUMNS, SUMMARY_FIELDS};

/// Rows between repeated schedule headers.
const HEADER_EVERY: u64 = 12;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    let msgs = messages(value);
    if !msgs.is_empty() {
        for m in msgs {
            println!("{}", m);
        }
        return;
    }

    match result {
        Value::Object(map) if map.contains_key("summary") => print_loan(map),
        Value::Object(map) => print_flat_object(map),
        other => println!("{}", format_value(other)),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }
    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_loan(result: &Map<String, Value>) {
    if let Some(Value::Object(summary)) = result.get("summary") {
        println!("Mortgage Summary");
        println!("{}", summary_table(summary));
    }
    if let Some(Value::Array(rows)) = result.get("amortization") {
        println!("\nAmortization Schedule");
        println!("{}", schedule_table(rows));
    }
}

fn summary_table(summary: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    for (key, label) in SUMMARY_FIELDS {
        let amount = summary.get(key).map(format_value).unwrap_or_default();
        builder.push_record([format!("{}:", label), format!("${}", amount)]);
    }
    builder.build()
}

/// Whether the header is shown again after `month_number`: after every
/// twelfth month, but never after the final row.
pub fn repeats_header_after(month_number: u64, total_rows: u64) -> bool {
    month_number % HEADER_EVERY == 0 && month_number != total_rows
}

fn schedule_table(rows: &[Value]) -> Table {
    let header = SCHEDULE_COLUMNS.map(|(_, title)| title);
    let total = rows.len() as u64;

    let mut builder = Builder::default();
    builder.push_record(header);
    for row in rows {
        builder.push_record(
            SCHEDULE_COLUMNS.map(|(key, _)| row.get(key).map(format_value).unwrap_or_default()),
        );
        let month = row.get("month_number").and_then(Value::as_u64).unwrap_or(0);
        if repeats_header_after(month, total) {
            builder.push_record(header);
        }
    }
    builder.build()
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", builder.build());
}
