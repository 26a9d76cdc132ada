use serde_json::Value;

/// Key answer of each calculator, most specific first.
const PRIORITY_KEYS: [&str; 10] = [
    "emi",
    "required_monthly_sip",
    "maturity_value",
    "tax",
    "converted",
    "future_value",
    "amount",
    "total_amount",
    "conversions",
    "interest",
];

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match (item.get("to"), item.get("converted")) {
                (Some(to), Some(converted)) => {
                    format!("{} {}", format_minimal(converted), format_minimal(to))
                }
                _ => format_minimal(item),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_key_wins() {
        let v = json!({ "result": { "months": 12, "emi": "8791.58", "total_amount": "105498.96" } });
        assert_eq!(minimal_answer(&v), "8791.58");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let v = json!({ "result": { "alpha": 1 } });
        assert_eq!(minimal_answer(&v), "alpha: 1");
    }

    #[test]
    fn test_conversions_one_per_line() {
        let v = json!({ "result": { "conversions": [
            { "to": "EUR", "converted": "92" },
            { "to": "INR", "converted": "8325" }
        ] } });
        assert_eq!(minimal_answer(&v), "92 EUR\n8325 INR");
    }
}
