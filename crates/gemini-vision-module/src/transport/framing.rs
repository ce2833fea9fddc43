//! Message framing for newline-delimited JSON.

use crate::types::{JsonRpcMessage, ModuleError, ModuleResult};

/// Parse a single line of text as a JSON-RPC message.
pub fn parse_message(line: &str) -> ModuleResult<JsonRpcMessage> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ModuleError::ParseError("Empty message".to_string()));
    }

    serde_json::from_str(trimmed).map_err(|e| ModuleError::ParseError(e.to_string()))
}

/// Serialize a value to a JSON line (with trailing newline).
pub fn frame_message(value: &serde_json::Value) -> ModuleResult<String> {
    let mut json = serde_json::to_string(value).map_err(ModuleError::Json)?;
    json.push('\n');
    Ok(json)
}
