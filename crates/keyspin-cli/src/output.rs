use serde_json::Value;

use crate::error::CliError;

/// Print a JSON payload to stdout.
pub fn render(payload: &Value, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(payload)?
    } else {
        serde_json::to_string(payload)?
    };
    println!("{rendered}");
    Ok(())
}
