//! Request envelope validation.

use crate::types::{JsonRpcRequest, ModuleError, ModuleResult, JSONRPC_VERSION};

/// Validate that a JSON-RPC request is well-formed before dispatch.
pub fn validate_request(request: &JsonRpcRequest) -> ModuleResult<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(ModuleError::InvalidRequest(format!(
            "Expected jsonrpc version \"{JSONRPC_VERSION}\", got \"{}\"",
            request.jsonrpc
        )));
    }

    if request.method.is_empty() {
        return Err(ModuleError::InvalidRequest(
            "Method name must not be empty".to_string(),
        ));
    }

    Ok(())
}
