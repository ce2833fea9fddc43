//! Error types and JSON-RPC error codes for the module server.

use gemini_vision::VisionError;

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId, JSONRPC_VERSION};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Vision-service error codes, mirroring the adapter's taxonomy.
pub mod vision_error_codes {
    /// A vision RPC arrived before `configure`.
    pub const NOT_CONFIGURED: i32 = -32800;
    /// Missing or invalid required configuration attribute.
    pub const CONFIG_ERROR: i32 = -32801;
    /// Named camera absent from the resolved dependency map.
    pub const DEPENDENCY_NOT_FOUND: i32 = -32802;
    /// Camera fetch failed.
    pub const CAMERA_ERROR: i32 = -32803;
    /// Outbound model request failed.
    pub const MODEL_CALL_FAILED: i32 = -32804;
    /// Semantic signal: capture not worth persisting.
    pub const NO_CAPTURE_TO_STORE: i32 = -32805;
    /// Capability surface this module deliberately does not support.
    pub const UNIMPLEMENTED: i32 = -32806;
}

/// All errors that can cross the module's protocol boundary.
#[derive(thiserror::Error, Debug)]
pub enum ModuleError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    /// The service has not received a valid `configure` yet.
    #[error("Service not configured")]
    NotConfigured,

    #[error(transparent)]
    Vision(#[from] VisionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModuleError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        use vision_error_codes::*;
        match self {
            ModuleError::ParseError(_) => PARSE_ERROR,
            ModuleError::InvalidRequest(_) => INVALID_REQUEST,
            ModuleError::MethodNotFound(_) => METHOD_NOT_FOUND,
            ModuleError::InvalidParams(_) => INVALID_PARAMS,
            ModuleError::InternalError(_) | ModuleError::Io(_) => INTERNAL_ERROR,
            ModuleError::NotConfigured => NOT_CONFIGURED,
            ModuleError::Json(_) => PARSE_ERROR,
            ModuleError::Vision(e) => match e {
                VisionError::MissingAttribute(_) | VisionError::InvalidAttribute(_) => CONFIG_ERROR,
                VisionError::DependencyNotFound(_) => DEPENDENCY_NOT_FOUND,
                VisionError::Camera(_) => CAMERA_ERROR,
                VisionError::ModelCall { .. } | VisionError::EmptyResponse => MODEL_CALL_FAILED,
                VisionError::NoCaptureToStore => NO_CAPTURE_TO_STORE,
                VisionError::Unimplemented(_) => UNIMPLEMENTED,
            },
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code: self.code(),
                message: self.to_string(),
                data: None,
            },
        }
    }
}

pub type ModuleResult<T> = Result<T, ModuleError>;
