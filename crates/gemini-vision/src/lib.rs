//! Gemini vision adapter — camera frames in, model descriptions out.
//!
//! The adapter translates a single upstream call ("classify this camera's
//! current frame", "describe this image with this prompt") into one
//! outbound Gemini request and reshapes the text result into the
//! vision-service response types. Cameras and the model are collaborators
//! injected at configuration time; the adapter implements neither.

pub mod camera;
pub mod config;
pub mod error;
pub mod gemini;
pub mod model;
pub mod service;
pub mod types;

pub use camera::{Camera, CameraRegistry};
pub use config::{VisionConfig, DEFAULT_PROMPT};
pub use error::{VisionError, VisionResult};
pub use gemini::GeminiClient;
pub use model::DescriptionModel;
pub use service::{from_data_management, VisionService, FROM_DM_KEY};
pub use types::{
    CaptureAllResult, CaptureOptions, Classification, Detection, Frame, PointCloudObject,
    Properties, MIME_JPEG,
};
