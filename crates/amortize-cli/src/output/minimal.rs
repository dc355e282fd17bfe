use serde_json::Value;

use super::{format_value, messages, result_of};

/// Result fields worth printing on their own, by priority.
const PRIORITY_KEYS: [&str; 3] = ["monthly_mortgage", "cumulative_interest", "valid"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let msgs = messages(value);
    if !msgs.is_empty() {
        return msgs.join("\n");
    }

    let result = result_of(value);
    let summary = result.get("summary").filter(|s| s.is_object());
    for key in PRIORITY_KEYS {
        let found = summary
            .and_then(|s| s.get(key))
            .or_else(|| result.get(key))
            .filter(|v| !v.is_null());
        if let Some(val) = found {
            return format_value(val);
        }
    }

    match result {
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(key, val)| format!("{}: {}", key, format_value(val)))
            .unwrap_or_default(),
        other => format_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_monthly_payment_from_summary() {
        let value = json!({
            "result": {"summary": {"monthly_mortgage": "2,684.11"}, "messages": []}
        });
        assert_eq!(minimal_line(&value), "2,684.11");
    }

    #[test]
    fn test_cumulative_interest() {
        let value = json!({"result": {"month_number": 12, "cumulative_interest": "24,832.47"}});
        assert_eq!(minimal_line(&value), "24,832.47");
    }

    #[test]
    fn test_messages_printed_as_lines() {
        let value = json!({"result": {"summary": "n/a", "messages": ["a", "b"]}});
        assert_eq!(minimal_line(&value), "a\nb");
    }

    #[test]
    fn test_validity_flag() {
        let value = json!({"result": {"valid": true, "messages": []}});
        assert_eq!(minimal_line(&value), "true");
    }
}
