//! The vision adapter: one inbound call, one outbound model request,
//! reshaped into the response type the host expects.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::camera::CameraRegistry;
use crate::config::VisionConfig;
use crate::error::{VisionError, VisionResult};
use crate::gemini::GeminiClient;
use crate::model::DescriptionModel;
use crate::types::{CaptureAllResult, CaptureOptions, Classification, Frame, Properties, MIME_JPEG};

/// Key the host's data manager sets in `extra` when a capture is taken for
/// background storage rather than a live caller.
pub const FROM_DM_KEY: &str = "fromDataManagement";

/// A configured vision service.
///
/// Holds no mutable state: one instance per configuration event, replaced
/// wholesale on reconfigure. In-flight requests keep whichever instance
/// they started with.
pub struct VisionService {
    config: VisionConfig,
    cameras: CameraRegistry,
    model: Arc<dyn DescriptionModel>,
}

impl VisionService {
    /// Build a service backed by the real Gemini client.
    pub fn new(config: VisionConfig, cameras: CameraRegistry) -> Self {
        let model = Arc::new(GeminiClient::new(&config.api_key, &config.model));
        Self::with_model(config, cameras, model)
    }

    /// Build a service with an explicit model collaborator.
    pub fn with_model(
        config: VisionConfig,
        cameras: CameraRegistry,
        model: Arc<dyn DescriptionModel>,
    ) -> Self {
        Self {
            config,
            cameras,
            model,
        }
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// Describe an image with the given prompt. Returns the model's text
    /// with surrounding whitespace trimmed.
    pub async fn get_description(&self, frame: &Frame, prompt: &str) -> VisionResult<String> {
        let text = self.model.describe(frame, prompt).await?;
        let text = text.trim().to_string();
        tracing::debug!(model = %self.config.model, response = %text, "model described frame");
        Ok(text)
    }

    /// Fetch a frame from the named camera, then describe it.
    pub async fn get_description_from_camera(
        &self,
        camera_name: &str,
        prompt: &str,
    ) -> VisionResult<String> {
        let frame = self.fetch_frame(camera_name).await?;
        self.get_description(&frame, prompt).await
    }

    /// Classify an image by describing it with the configured prompt.
    ///
    /// `count` is accepted and ignored: this adapter never returns more
    /// than one classification, always with confidence 1.0.
    pub async fn get_classifications(
        &self,
        frame: &Frame,
        count: usize,
    ) -> VisionResult<Vec<Classification>> {
        let _ = count;
        let description = self.get_description(frame, &self.config.prompt).await?;
        Ok(vec![Classification::certain(description)])
    }

    /// Fetch a frame from the named camera, then classify it.
    pub async fn get_classifications_from_camera(
        &self,
        camera_name: &str,
        count: usize,
    ) -> VisionResult<Vec<Classification>> {
        let result = self
            .capture_all_from_camera(
                camera_name,
                CaptureOptions {
                    return_image: true,
                    return_classifications: true,
                    ..CaptureOptions::default()
                },
                None,
            )
            .await?;
        let _ = count;
        Ok(result.classifications)
    }

    /// The canonical capture call: resolve the camera, grab one JPEG
    /// frame, classify it once, then gate each result field on the
    /// requested flags. Detections and objects are always empty.
    pub async fn capture_all_from_camera(
        &self,
        camera_name: &str,
        options: CaptureOptions,
        extra: Option<&Map<String, Value>>,
    ) -> VisionResult<CaptureAllResult> {
        // Fail fast on an unknown camera, before any outbound call.
        let camera = self.cameras.get(camera_name)?;
        let frame = camera.get_image(MIME_JPEG).await?;

        let classifications = self.get_classifications(&frame, 1).await?;

        let mut result = CaptureAllResult::default();
        if options.return_image {
            result.image = Some(frame);
        }
        if options.return_classifications {
            result.classifications = classifications;
        }

        // Data-manager gating runs on the flag-gated result: only labels
        // actually returned count toward a capture worth storing, so a
        // capture with classifications suppressed is never persisted.
        if from_data_management(extra)
            && !result
                .classifications
                .iter()
                .any(|c| !c.class_name.is_empty())
        {
            return Err(VisionError::NoCaptureToStore);
        }

        Ok(result)
    }

    /// Service-level capability record. Empty for this adapter.
    pub fn get_properties(&self) -> Properties {
        Properties::default()
    }

    pub async fn get_detections(&self) -> VisionResult<Vec<crate::types::Detection>> {
        Err(VisionError::Unimplemented("get_detections"))
    }

    pub async fn get_detections_from_camera(
        &self,
        _camera_name: &str,
    ) -> VisionResult<Vec<crate::types::Detection>> {
        Err(VisionError::Unimplemented("get_detections_from_camera"))
    }

    pub async fn get_object_point_clouds(
        &self,
    ) -> VisionResult<Vec<crate::types::PointCloudObject>> {
        Err(VisionError::Unimplemented("get_object_point_clouds"))
    }

    pub async fn do_command(&self, _command: &Map<String, Value>) -> VisionResult<Value> {
        Err(VisionError::Unimplemented("do_command"))
    }

    async fn fetch_frame(&self, camera_name: &str) -> VisionResult<Frame> {
        let camera = self.cameras.get(camera_name)?;
        camera.get_image(MIME_JPEG).await
    }
}

impl std::fmt::Debug for VisionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionService")
            .field("camera_name", &self.config.camera_name)
            .field("model", &self.config.model)
            .field("cameras", &self.cameras)
            .finish_non_exhaustive()
    }
}

/// Whether `extra` marks this request as issued by the host's data
/// manager for background capture.
pub fn from_data_management(extra: Option<&Map<String, Value>>) -> bool {
    extra
        .and_then(|m| m.get(FROM_DM_KEY))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
