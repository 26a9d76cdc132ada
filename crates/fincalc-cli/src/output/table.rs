use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::split_result;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        let (scalars, tables) = split_result(res_map);

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in scalars {
            builder.push_record([key, &format_value(val)]);
        }
        println!("{}", Table::from(builder));

        // Schedules and breakdowns get their own table each
        for (name, rows) in tables {
            println!("\n{} ({} rows):", section_heading(name), rows.len());
            print_array_table(rows);
        }
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
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

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

/// Heading for a row table nested in a calculator result.
fn section_heading(field: &str) -> String {
    match field {
        "schedule" => "Amortization schedule".to_string(),
        "year_by_year" => "Year-by-year projection".to_string(),
        "slab_breakdown" => "Tax by slab".to_string(),
        "deductions_applied" => "Deductions applied".to_string(),
        "conversions" => "Conversions".to_string(),
        other => {
            let spaced = other.replace('_', " ");
            let mut chars = spaced.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => spaced,
            }
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_row_tables_get_readable_headings() {
        assert_eq!(section_heading("schedule"), "Amortization schedule");
        assert_eq!(section_heading("year_by_year"), "Year-by-year projection");
        assert_eq!(section_heading("slab_breakdown"), "Tax by slab");
    }

    #[test]
    fn test_unknown_row_table_heading_is_humanised() {
        assert_eq!(section_heading("maturity_breakdown"), "Maturity breakdown");
        assert_eq!(section_heading(""), "");
    }

    #[test]
    fn test_format_value_for_cells() {
        assert_eq!(format_value(&json!(null)), "-");
        assert_eq!(format_value(&json!("10379.18")), "10379.18");
        assert_eq!(format_value(&json!(["80C", "80D"])), "80C, 80D");
    }
}
