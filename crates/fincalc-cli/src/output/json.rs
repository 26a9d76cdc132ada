use serde_json::Value;
use std::io::{self, Write};

/// Print the result envelope. Pretty on a terminal, one line when piped
/// so the output stays friendly to `jq` and line-based tools.
pub fn print_json(value: &Value) {
    let pretty = atty::is(atty::Stream::Stdout);
    let stdout = io::stdout();
    if let Err(e) = write_json(&mut stdout.lock(), value, pretty) {
        eprintln!("JSON output error: {e}");
    }
}

pub fn write_json<W: Write>(
    out: &mut W,
    value: &Value,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_piped_output_is_one_line() {
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({ "result": { "emi": "10379.18" } }), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "{\"result\":{\"emi\":\"10379.18\"}}\n");
    }

    #[test]
    fn test_terminal_output_is_indented() {
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({ "result": { "emi": "10379.18" } }), true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().count() > 1);
        assert!(text.contains("  \"result\""));
    }
}
