pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Split a result object into scalar fields and arrays of row objects
/// (schedules, year-by-year projections, slab breakdowns).
pub fn split_result(
    result: &serde_json::Map<String, Value>,
) -> (Vec<(&str, &Value)>, Vec<(&str, &[Value])>) {
    let mut scalars = Vec::new();
    let mut tables = Vec::new();
    for (key, val) in result {
        match val {
            Value::Array(rows) if rows.iter().all(Value::is_object) && !rows.is_empty() => {
                tables.push((key.as_str(), rows.as_slice()))
            }
            Value::Array(rows) if rows.is_empty() => {}
            _ => scalars.push((key.as_str(), val)),
        }
    }
    (scalars, tables)
}
