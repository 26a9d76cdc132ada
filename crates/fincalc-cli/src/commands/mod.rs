pub mod currency;
pub mod interest;
pub mod investments;
pub mod loans;
pub mod planning;
pub mod tax;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::input;

pub type CommandResult = Result<Value, Box<dyn std::error::Error>>;

/// Pick the calculator input from, in order: `--input` file, individual
/// flags (built by `from_flags` when any flag was given), piped JSON or YAML.
pub fn load_input<T: DeserializeOwned>(
    path: Option<&str>,
    any_flag_given: bool,
    from_flags: impl FnOnce() -> Result<T, Box<dyn std::error::Error>>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return input::file::read_input(path);
    }
    if any_flag_given {
        return from_flags();
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(data);
    }
    Err(format!("flags, --input <file.json|file.yaml> or piped input required for {what}").into())
}

/// Error message for a missing required flag on a command that also
/// accepts `--input`.
pub fn missing(flag: &str) -> String {
    format!("--{flag} is required (or provide --input)")
}

/// Error message for a missing flag on a flags-only command such as `convert`.
pub fn missing_flag(command: &str, flag: &str) -> String {
    format!("--{flag} is required for {command}")
}
