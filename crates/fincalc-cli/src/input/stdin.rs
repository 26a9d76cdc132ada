use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Read calculator input piped on stdin.
/// Returns None when stdin is a terminal or carries nothing but whitespace.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

/// JSON objects start with `{`; anything else is read as YAML.
fn parse_piped<T: DeserializeOwned>(text: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = if trimmed.starts_with('{') {
        serde_json::from_str(trimmed).map_err(|e| format!("Invalid JSON on stdin: {e}"))?
    } else {
        serde_yaml::from_str(trimmed).map_err(|e| format!("Invalid YAML on stdin: {e}"))?
    };
    log::debug!("read {} bytes of input from stdin", trimmed.len());
    Ok(Some(value))
}
