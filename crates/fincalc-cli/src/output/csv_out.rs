use serde_json::Value;
use std::io;

use super::split_result;

/// Write output as CSV to stdout.
///
/// Scalar result fields come first as `field,value` rows; each row table in
/// the result (schedule, year_by_year, ...) follows after a blank line with
/// its own header.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());
    write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) {
    match value {
        Value::Object(map) => {
            let result = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let (scalars, tables) = split_result(result);
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in scalars {
                let _ = wtr.write_record([key, &format_csv_value(val)]);
            }
            for (name, rows) in tables {
                let _ = wtr.write_record([""]);
                let _ = wtr.write_record([name]);
                write_array_csv(wtr, rows);
            }
        }
        Value::Array(arr) => {
            write_array_csv(wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        write_csv(&mut wtr, value);
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_scalars_then_row_tables() {
        let v = json!({
            "result": {
                "emi": "1000",
                "schedule": [
                    { "month": 1, "closing_balance": "11000" },
                    { "month": 2, "closing_balance": "10000" }
                ]
            },
            "warnings": []
        });
        let out = render(&v);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "field,value");
        assert_eq!(lines[1], "emi,1000");
        let at = lines.iter().position(|l| *l == "schedule").unwrap();
        assert_eq!(lines[at + 1], "closing_balance,month");
        assert_eq!(lines[at + 2], "11000,1");
        assert_eq!(lines[at + 3], "10000,2");
    }
}
