//! Response shapes for the vision-service surface.

use serde::{Deserialize, Serialize};

/// JPEG is the only mime type the adapter requests from cameras and the
/// only one it declares to the model.
pub const MIME_JPEG: &str = "image/jpeg";

/// A single still image fetched from a camera at request time.
///
/// The adapter never owns a frame beyond one request; it is forwarded to
/// the model and optionally echoed back in a capture result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl Frame {
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self {
            data,
            mime_type: MIME_JPEG.to_string(),
        }
    }
}

/// A (label, confidence) pair produced by describing an image.
///
/// The adapter does not compute real confidence; every classification it
/// emits carries a fixed 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub class_name: String,
    pub confidence: f64,
}

impl Classification {
    pub fn certain(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            confidence: 1.0,
        }
    }
}

/// A 2D detection. The adapter never produces these; the type exists so
/// capture results carry the full aggregate shape the host expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_name: String,
    pub confidence: f64,
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

/// A 3D object with an associated point cloud. Never produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloudObject {
    pub label: String,
    pub point_cloud: Vec<u8>,
}

/// Which fields a capture call should populate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureOptions {
    pub return_image: bool,
    pub return_classifications: bool,
    pub return_detections: bool,
    pub return_object_point_clouds: bool,
}

/// Aggregate result of a capture: one optional frame plus derived results.
///
/// Detections and objects are always empty for this adapter.
#[derive(Debug, Clone, Default)]
pub struct CaptureAllResult {
    pub image: Option<Frame>,
    pub classifications: Vec<Classification>,
    pub detections: Vec<Detection>,
    pub objects: Vec<PointCloudObject>,
}

/// Service-level capability record. The adapter advertises nothing; the
/// host treats an all-false record as an empty properties object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub classifications_supported: bool,
    pub detections_supported: bool,
    pub object_point_clouds_supported: bool,
}
