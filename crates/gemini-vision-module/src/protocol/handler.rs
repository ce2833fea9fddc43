//! Request dispatcher — routes vision-service RPCs to the adapter.

use std::sync::Arc;

use base64::Engine;
use serde_json::Value;
use tokio::sync::RwLock;

use gemini_vision::{
    CameraRegistry, CaptureOptions, DescriptionModel, Frame, GeminiClient, VisionConfig,
    VisionService,
};

use crate::types::*;

use super::validator::validate_request;

/// Builds the model collaborator for a fresh configuration. The default
/// factory constructs the real Gemini client; tests inject mocks here.
pub type ModelFactory = Box<dyn Fn(&VisionConfig) -> Arc<dyn DescriptionModel> + Send + Sync>;

/// Dispatches incoming JSON-RPC messages to the vision service.
///
/// The configured service lives behind an `RwLock<Option<Arc<_>>>`:
/// `configure` replaces it wholesale, and each request clones the `Arc`
/// up front so in-flight work always sees one consistent configuration
/// snapshot.
pub struct VisionHandler {
    cameras: CameraRegistry,
    service: RwLock<Option<Arc<VisionService>>>,
    model_factory: ModelFactory,
}

impl VisionHandler {
    /// Handler backed by the real Gemini client.
    pub fn new(cameras: CameraRegistry) -> Self {
        Self::with_model_factory(
            cameras,
            Box::new(|config| Arc::new(GeminiClient::new(&config.api_key, &config.model))),
        )
    }

    /// Handler with an explicit model factory.
    pub fn with_model_factory(cameras: CameraRegistry, model_factory: ModelFactory) -> Self {
        Self {
            cameras,
            service: RwLock::new(None),
            model_factory,
        }
    }

    pub async fn handle_message(&self, msg: JsonRpcMessage) -> Option<Value> {
        match msg {
            JsonRpcMessage::Request(req) => Some(self.handle_request(req).await),
            JsonRpcMessage::Notification(notif) => {
                tracing::debug!(method = %notif.method, "ignoring notification");
                None
            }
            _ => {
                tracing::warn!("received unexpected message type from host");
                None
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Value {
        if let Err(e) = validate_request(&request) {
            return serde_json::to_value(e.to_json_rpc_error(request.id)).unwrap_or_default();
        }

        let id = request.id.clone();
        let result = self.dispatch_request(&request).await;

        match result {
            Ok(value) => serde_json::to_value(JsonRpcResponse::new(id, value)).unwrap_or_default(),
            Err(e) => {
                // Single boundary point for diagnostic logging; the error
                // itself crosses the wire unchanged.
                tracing::error!(method = %request.method, code = e.code(), error = %e, "request failed");
                serde_json::to_value(e.to_json_rpc_error(id)).unwrap_or_default()
            }
        }
    }

    async fn dispatch_request(&self, request: &JsonRpcRequest) -> ModuleResult<Value> {
        match request.method.as_str() {
            "validate_config" => self.handle_validate_config(request.params.clone()),
            "configure" => self.handle_configure(request.params.clone()).await,

            "vision/get_classifications" => {
                self.handle_get_classifications(request.params.clone()).await
            }
            "vision/get_classifications_from_camera" => {
                self.handle_classifications_from_camera(request.params.clone())
                    .await
            }
            "vision/get_description" => self.handle_get_description(request.params.clone()).await,
            "vision/get_description_from_camera" => {
                self.handle_description_from_camera(request.params.clone())
                    .await
            }
            "vision/capture_all_from_camera" => {
                self.handle_capture_all(request.params.clone()).await
            }
            "vision/get_properties" => self.handle_get_properties().await,

            "vision/get_detections" => {
                let service = self.service().await?;
                let detections = service.get_detections().await?;
                to_result(&detections)
            }
            "vision/get_detections_from_camera" => {
                let params: CameraParams = parse_params(request.params.clone())?;
                let service = self.service().await?;
                let detections = service
                    .get_detections_from_camera(&params.camera_name)
                    .await?;
                to_result(&detections)
            }
            "vision/get_object_point_clouds" => {
                let service = self.service().await?;
                let objects = service.get_object_point_clouds().await?;
                to_result(&objects)
            }
            "vision/do_command" => {
                let params: DoCommandParams = parse_params(request.params.clone())?;
                let service = self.service().await?;
                let reply = service.do_command(&params.command).await?;
                Ok(reply)
            }

            "ping" => Ok(Value::Object(serde_json::Map::new())),
            "shutdown" => {
                tracing::info!("shutdown requested");
                Ok(Value::Object(serde_json::Map::new()))
            }

            _ => Err(ModuleError::MethodNotFound(request.method.clone())),
        }
    }

    fn handle_validate_config(&self, params: Option<Value>) -> ModuleResult<Value> {
        let config_params: ConfigParams = parse_params(params)?;
        let dependencies = VisionConfig::validate(&config_params.attributes)?;
        to_result(&ValidateResult { dependencies })
    }

    async fn handle_configure(&self, params: Option<Value>) -> ModuleResult<Value> {
        let config_params: ConfigParams = parse_params(params)?;
        let config = VisionConfig::from_attributes(&config_params.attributes)?;

        tracing::info!(
            camera = %config.camera_name,
            model = %config.model,
            "configuring vision service"
        );

        let model = (self.model_factory)(&config);
        let service = Arc::new(VisionService::with_model(
            config,
            self.cameras.clone(),
            model,
        ));

        // Wholesale replacement; requests already holding the previous
        // Arc finish against the old snapshot.
        *self.service.write().await = Some(service);

        Ok(Value::Object(serde_json::Map::new()))
    }

    async fn handle_get_classifications(&self, params: Option<Value>) -> ModuleResult<Value> {
        let params: ImageParams = parse_params(params)?;
        note_ignored_timeout(params.timeout);
        let frame = decode_frame(&params)?;
        let service = self.service().await?;
        let classifications = service
            .get_classifications(&frame, params.count.unwrap_or(1))
            .await?;
        to_result(&ClassificationsResult { classifications })
    }

    async fn handle_classifications_from_camera(
        &self,
        params: Option<Value>,
    ) -> ModuleResult<Value> {
        let params: CameraParams = parse_params(params)?;
        note_ignored_timeout(params.timeout);
        let service = self.service().await?;
        let classifications = service
            .get_classifications_from_camera(&params.camera_name, params.count.unwrap_or(1))
            .await?;
        to_result(&ClassificationsResult { classifications })
    }

    async fn handle_get_description(&self, params: Option<Value>) -> ModuleResult<Value> {
        let params: ImageParams = parse_params(params)?;
        note_ignored_timeout(params.timeout);
        let prompt = required_prompt(params.prompt.as_deref())?;
        let frame = decode_frame(&params)?;
        let service = self.service().await?;
        let description = service.get_description(&frame, prompt).await?;
        to_result(&DescriptionResult { description })
    }

    async fn handle_description_from_camera(&self, params: Option<Value>) -> ModuleResult<Value> {
        let params: CameraParams = parse_params(params)?;
        note_ignored_timeout(params.timeout);
        let prompt = required_prompt(params.prompt.as_deref())?;
        let service = self.service().await?;
        let description = service
            .get_description_from_camera(&params.camera_name, prompt)
            .await?;
        to_result(&DescriptionResult { description })
    }

    async fn handle_capture_all(&self, params: Option<Value>) -> ModuleResult<Value> {
        let params: CaptureAllParams = parse_params(params)?;
        note_ignored_timeout(params.timeout);
        let service = self.service().await?;
        let result = service
            .capture_all_from_camera(
                &params.camera_name,
                CaptureOptions {
                    return_image: params.return_image,
                    return_classifications: params.return_classifications,
                    return_detections: params.return_detections,
                    return_object_point_clouds: params.return_object_point_clouds,
                },
                params.extra.as_ref(),
            )
            .await?;
        to_result(&CaptureAllResponse::from(&result))
    }

    async fn handle_get_properties(&self) -> ModuleResult<Value> {
        let service = self.service().await?;
        to_result(&service.get_properties())
    }

    /// Clone the current configuration snapshot, or fail if `configure`
    /// has not run yet.
    async fn service(&self) -> ModuleResult<Arc<VisionService>> {
        self.service
            .read()
            .await
            .clone()
            .ok_or(ModuleError::NotConfigured)
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(params: Option<Value>) -> ModuleResult<T> {
    params
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| ModuleError::InvalidParams(e.to_string()))?
        .ok_or_else(|| ModuleError::InvalidParams("params required".to_string()))
}

fn to_result<T: serde::Serialize>(value: &T) -> ModuleResult<Value> {
    serde_json::to_value(value).map_err(|e| ModuleError::InternalError(e.to_string()))
}

fn decode_frame(params: &ImageParams) -> ModuleResult<Frame> {
    let data = base64::engine::general_purpose::STANDARD
        .decode(&params.image)
        .map_err(|e| ModuleError::InvalidParams(format!("invalid base64 image: {e}")))?;
    Ok(Frame {
        data,
        mime_type: params.mime_type.clone(),
    })
}

fn required_prompt(prompt: Option<&str>) -> ModuleResult<&str> {
    prompt.ok_or_else(|| ModuleError::InvalidParams("'prompt' required".to_string()))
}

fn note_ignored_timeout(timeout: Option<f64>) {
    if let Some(seconds) = timeout {
        tracing::debug!(seconds, "timeout accepted but not enforced on outbound calls");
    }
}
