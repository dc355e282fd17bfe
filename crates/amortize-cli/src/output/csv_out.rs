use serde_json::{Map, Value};
use std::io::{self, Write};

use super::{format_value, messages, result_of, SCHEDULE_COLUMNS, SUMMARY_FIELDS};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_csv<W: Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    let msgs = messages(value);
    if !msgs.is_empty() {
        wtr.write_record(["message"])?;
        for m in msgs {
            wtr.write_record([m])?;
        }
        return wtr.flush().map_err(Into::into);
    }

    match result_of(value) {
        Value::Object(result) => {
            if let Some(Value::Array(rows)) = result.get("amortization") {
                write_schedule(wtr, rows)?;
            } else if let Some(Value::Object(summary)) = result.get("summary") {
                write_summary(wtr, summary)?;
            } else {
                wtr.write_record(["field", "value"])?;
                for (key, val) in result {
                    wtr.write_record([key.as_str(), &format_value(val)])?;
                }
            }
        }
        other => wtr.write_record([format_value(other)])?,
    }
    wtr.flush().map_err(Into::into)
}

fn write_schedule<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    wtr.write_record(SCHEDULE_COLUMNS.map(|(key, _)| key))?;
    for row in rows {
        wtr.write_record(
            SCHEDULE_COLUMNS.map(|(key, _)| row.get(key).map(format_value).unwrap_or_default()),
        )?;
    }
    Ok(())
}

fn write_summary<W: Write>(
    wtr: &mut csv::Writer<W>,
    summary: &Map<String, Value>,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, _) in SUMMARY_FIELDS {
        let amount = summary.get(key).map(format_value).unwrap_or_default();
        wtr.write_record([key, amount.as_str()])?;
    }
    Ok(())
}
