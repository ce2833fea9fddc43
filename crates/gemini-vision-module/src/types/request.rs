//! Parameter types for the vision-service RPC surface.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Params for `validate_config` and `configure`: the raw attribute map
/// the host assembled for this service instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigParams {
    pub attributes: Map<String, Value>,
}

/// Params for `vision/get_classifications` and `vision/get_description`:
/// an inline image payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageParams {
    /// Base64-encoded image bytes.
    pub image: String,
    #[serde(default = "default_mime")]
    pub mime_type: String,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub prompt: Option<String>,
    /// Accepted for interface compatibility; not enforced.
    #[serde(default)]
    pub timeout: Option<f64>,
}

/// Params for the `*_from_camera` calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraParams {
    pub camera_name: String,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub prompt: Option<String>,
    /// Accepted for interface compatibility; not enforced.
    #[serde(default)]
    pub timeout: Option<f64>,
}

/// Params for `vision/capture_all_from_camera`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureAllParams {
    pub camera_name: String,
    #[serde(default)]
    pub return_image: bool,
    #[serde(default)]
    pub return_classifications: bool,
    #[serde(default)]
    pub return_detections: bool,
    #[serde(default)]
    pub return_object_point_clouds: bool,
    #[serde(default)]
    pub extra: Option<Map<String, Value>>,
    /// Accepted for interface compatibility; not enforced.
    #[serde(default)]
    pub timeout: Option<f64>,
}

/// Params for `vision/do_command`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoCommandParams {
    #[serde(default)]
    pub command: Map<String, Value>,
}

fn default_mime() -> String {
    gemini_vision::MIME_JPEG.to_string()
}
