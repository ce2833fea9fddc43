//! Wire forms of the vision-service results.

use base64::Engine;
use serde::{Deserialize, Serialize};

use gemini_vision::{CaptureAllResult, Classification, Detection, Frame, PointCloudObject};

/// Result of `validate_config`: the resource names the host must resolve
/// and inject before `configure`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResult {
    pub dependencies: Vec<String>,
}

/// A frame as carried on the wire: base64 payload plus mime type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameResponse {
    pub data: String,
    pub mime_type: String,
}

impl From<&Frame> for FrameResponse {
    fn from(frame: &Frame) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(&frame.data),
            mime_type: frame.mime_type.clone(),
        }
    }
}

impl FrameResponse {
    /// Decode back into a byte-oriented frame.
    pub fn decode(&self) -> Result<Frame, base64::DecodeError> {
        Ok(Frame {
            data: base64::engine::general_purpose::STANDARD.decode(&self.data)?,
            mime_type: self.mime_type.clone(),
        })
    }
}

/// Result of `vision/get_classifications*`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationsResult {
    pub classifications: Vec<Classification>,
}

/// Result of `vision/get_description*`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionResult {
    pub description: String,
}

/// Result of `vision/capture_all_from_camera`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureAllResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<FrameResponse>,
    #[serde(default)]
    pub classifications: Vec<Classification>,
    #[serde(default)]
    pub detections: Vec<Detection>,
    #[serde(default)]
    pub objects: Vec<PointCloudObject>,
}

impl From<&CaptureAllResult> for CaptureAllResponse {
    fn from(result: &CaptureAllResult) -> Self {
        Self {
            image: result.image.as_ref().map(FrameResponse::from),
            classifications: result.classifications.clone(),
            detections: result.detections.clone(),
            objects: result.objects.clone(),
        }
    }
}
