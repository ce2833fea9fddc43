//! Integration tests for the vision-service RPC surface, driven through
//! the protocol handler the same way the stdio transport drives it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use serde_json::{json, Value};

use gemini_vision::{
    Camera, CameraRegistry, DescriptionModel, Frame, VisionError, VisionResult, MIME_JPEG,
};
use gemini_vision_module::protocol::VisionHandler;
use gemini_vision_module::transport::framing;
use gemini_vision_module::types::*;

// ─────────────────────── helpers ───────────────────────

struct StubCamera {
    name: String,
    frame: Vec<u8>,
    fetches: AtomicUsize,
}

#[async_trait]
impl Camera for StubCamera {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_image(&self, mime_type: &str) -> VisionResult<Frame> {
        assert_eq!(mime_type, MIME_JPEG);
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(Frame::jpeg(self.frame.clone()))
    }
}

#[derive(Default)]
struct StubModel {
    reply: Option<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubModel {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            ..Self::default()
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl DescriptionModel for StubModel {
    async fn describe(&self, _frame: &Frame, prompt: &str) -> VisionResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(VisionError::ModelCall {
                status: None,
                message: "connection reset".to_string(),
            }),
        }
    }
}

/// Handler wired with one stub camera ("cam1", 10-byte JPEG stub) and the
/// given stub model.
fn handler_with(model: Arc<StubModel>) -> (VisionHandler, Arc<StubCamera>) {
    let camera = Arc::new(StubCamera {
        name: "cam1".to_string(),
        frame: vec![0u8; 10],
        fetches: AtomicUsize::new(0),
    });
    let mut cameras = CameraRegistry::new();
    cameras.register(camera.clone());

    let handler =
        VisionHandler::with_model_factory(cameras, Box::new(move |_config| model.clone()));
    (handler, camera)
}

/// Build a JSON-RPC request value.
fn rpc_request(id: i64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params
    })
}

fn config_attributes() -> Value {
    json!({
        "attributes": {
            "api_key": "k",
            "camera_name": "cam1",
            "model": "gemini-2.0-flash",
            "prompt": "describe"
        }
    })
}

/// Send a JSON-RPC message through the handler and return the response.
async fn send(handler: &VisionHandler, msg: Value) -> Value {
    let parsed: JsonRpcMessage = serde_json::from_value(msg).unwrap();
    handler
        .handle_message(parsed)
        .await
        .expect("expected response")
}

async fn configure(handler: &VisionHandler) {
    let response = send(handler, rpc_request(1, "configure", config_attributes())).await;
    assert!(response.get("result").is_some(), "configure failed: {response}");
}

fn error_code(response: &Value) -> i64 {
    response["error"]["code"].as_i64().expect("error response")
}

// ─────────────────────── configuration ───────────────────────

#[tokio::test]
async fn validate_config_returns_camera_dependency() {
    let (handler, _) = handler_with(StubModel::replying("a red ball"));
    let response = send(
        &handler,
        rpc_request(1, "validate_config", config_attributes()),
    )
    .await;

    assert_eq!(response["result"]["dependencies"], json!(["cam1"]));
}

#[tokio::test]
async fn validate_config_names_missing_key() {
    let (handler, _) = handler_with(StubModel::replying("a red ball"));
    let response = send(
        &handler,
        rpc_request(
            1,
            "validate_config",
            json!({ "attributes": { "camera_name": "cam1", "model": "m" } }),
        ),
    )
    .await;

    assert_eq!(error_code(&response), -32801);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("api_key"));
}

#[tokio::test]
async fn vision_rpc_before_configure_fails() {
    let (handler, _) = handler_with(StubModel::replying("a red ball"));
    let response = send(
        &handler,
        rpc_request(
            1,
            "vision/get_classifications_from_camera",
            json!({ "camera_name": "cam1", "count": 1 }),
        ),
    )
    .await;

    assert_eq!(error_code(&response), -32800);
}

#[tokio::test]
async fn reconfigure_replaces_prior_configuration() {
    let model = StubModel::replying("a red ball");
    let (handler, _) = handler_with(model.clone());
    configure(&handler).await;

    let second = json!({
        "attributes": {
            "api_key": "k2",
            "camera_name": "cam1",
            "model": "gemini-2.0-flash",
            "prompt": "second prompt"
        }
    });
    let response = send(&handler, rpc_request(2, "configure", second)).await;
    assert!(response.get("result").is_some());

    send(
        &handler,
        rpc_request(
            3,
            "vision/get_classifications_from_camera",
            json!({ "camera_name": "cam1", "count": 1 }),
        ),
    )
    .await;

    let prompts = model.prompts.lock().unwrap();
    assert_eq!(prompts.as_slice(), ["second prompt"]);
}

// ─────────────────────── end-to-end scenarios ───────────────────────

#[tokio::test]
async fn classifications_from_camera_round_trip() {
    let (handler, camera) = handler_with(StubModel::replying("a red ball"));
    configure(&handler).await;

    let response = send(
        &handler,
        rpc_request(
            2,
            "vision/get_classifications_from_camera",
            json!({ "camera_name": "cam1", "count": 1 }),
        ),
    )
    .await;

    assert_eq!(
        response["result"]["classifications"],
        json!([{ "class_name": "a red ball", "confidence": 1.0 }])
    );
    assert_eq!(camera.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn model_failure_propagates_after_camera_fetch() {
    let (handler, camera) = handler_with(StubModel::failing());
    configure(&handler).await;

    let response = send(
        &handler,
        rpc_request(
            2,
            "vision/get_description_from_camera",
            json!({ "camera_name": "cam1", "prompt": "describe" }),
        ),
    )
    .await;

    assert_eq!(error_code(&response), -32804);
    assert_eq!(camera.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn description_of_inline_image() {
    let (handler, _) = handler_with(StubModel::replying("  a red ball\n"));
    configure(&handler).await;

    let image = base64::engine::general_purpose::STANDARD.encode([0u8; 10]);
    let response = send(
        &handler,
        rpc_request(
            2,
            "vision/get_description",
            json!({ "image": image, "prompt": "describe" }),
        ),
    )
    .await;

    assert_eq!(response["result"]["description"], "a red ball");
}

#[tokio::test]
async fn capture_all_with_flags_false_returns_empty_aggregate() {
    let model = StubModel::replying("a red ball");
    let (handler, camera) = handler_with(model.clone());
    configure(&handler).await;

    let response = send(
        &handler,
        rpc_request(
            2,
            "vision/capture_all_from_camera",
            json!({ "camera_name": "cam1" }),
        ),
    )
    .await;

    let result = &response["result"];
    assert!(result.get("image").is_none());
    assert_eq!(result["classifications"], json!([]));
    assert_eq!(result["detections"], json!([]));
    assert_eq!(result["objects"], json!([]));
    // The capture still happened: one fetch, one model call.
    assert_eq!(camera.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn capture_all_returns_image_and_classifications_when_asked() {
    let (handler, _) = handler_with(StubModel::replying("a red ball"));
    configure(&handler).await;

    let response = send(
        &handler,
        rpc_request(
            2,
            "vision/capture_all_from_camera",
            json!({
                "camera_name": "cam1",
                "return_image": true,
                "return_classifications": true
            }),
        ),
    )
    .await;

    let result = &response["result"];
    let wire_frame: FrameResponse = serde_json::from_value(result["image"].clone()).unwrap();
    let frame = wire_frame.decode().unwrap();
    assert_eq!(frame.mime_type, "image/jpeg");
    assert_eq!(frame.data, vec![0u8; 10]);
    assert_eq!(
        result["classifications"],
        json!([{ "class_name": "a red ball", "confidence": 1.0 }])
    );
}

#[tokio::test]
async fn unknown_camera_fails_fast_with_no_model_call() {
    let model = StubModel::replying("a red ball");
    let (handler, _) = handler_with(model.clone());
    configure(&handler).await;

    let response = send(
        &handler,
        rpc_request(
            2,
            "vision/capture_all_from_camera",
            json!({ "camera_name": "ghost" }),
        ),
    )
    .await;

    assert_eq!(error_code(&response), -32802);
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn data_manager_capture_without_label_is_rejected() {
    let (handler, _) = handler_with(StubModel::replying(""));
    configure(&handler).await;

    let response = send(
        &handler,
        rpc_request(
            2,
            "vision/capture_all_from_camera",
            json!({
                "camera_name": "cam1",
                "return_classifications": true,
                "extra": { "fromDataManagement": true }
            }),
        ),
    )
    .await;

    assert_eq!(error_code(&response), -32805);
}

// ─────────────────────── interface contract ───────────────────────

#[tokio::test]
async fn classify_count_is_accepted_but_ignored() {
    let (handler, _) = handler_with(StubModel::replying("a red ball"));
    configure(&handler).await;

    for count in [0, 1, 5] {
        let response = send(
            &handler,
            rpc_request(
                2,
                "vision/get_classifications_from_camera",
                json!({ "camera_name": "cam1", "count": count }),
            ),
        )
        .await;
        assert_eq!(
            response["result"]["classifications"]
                .as_array()
                .unwrap()
                .len(),
            1
        );
    }
}

#[tokio::test]
async fn timeout_is_accepted_but_not_enforced() {
    let (handler, _) = handler_with(StubModel::replying("a red ball"));
    configure(&handler).await;

    let response = send(
        &handler,
        rpc_request(
            2,
            "vision/get_classifications_from_camera",
            json!({ "camera_name": "cam1", "count": 1, "timeout": 0.001 }),
        ),
    )
    .await;

    assert!(response.get("result").is_some());
}

#[tokio::test]
async fn properties_record_is_empty() {
    let (handler, _) = handler_with(StubModel::replying("a red ball"));
    configure(&handler).await;

    let response = send(&handler, rpc_request(2, "vision/get_properties", json!({}))).await;
    assert_eq!(
        response["result"],
        json!({
            "classifications_supported": false,
            "detections_supported": false,
            "object_point_clouds_supported": false
        })
    );
}

#[tokio::test]
async fn unimplemented_surface_always_fails() {
    let model = StubModel::replying("a red ball");
    let (handler, _) = handler_with(model.clone());
    configure(&handler).await;

    for (method, params) in [
        ("vision/get_detections", json!({})),
        (
            "vision/get_detections_from_camera",
            json!({ "camera_name": "cam1" }),
        ),
        ("vision/get_object_point_clouds", json!({})),
        ("vision/do_command", json!({ "command": {} })),
    ] {
        let response = send(&handler, rpc_request(2, method, params)).await;
        assert_eq!(error_code(&response), -32806, "{method}");
    }
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_method_is_rejected() {
    let (handler, _) = handler_with(StubModel::replying("a red ball"));
    let response = send(&handler, rpc_request(1, "vision/segment", json!({}))).await;
    assert_eq!(error_code(&response), -32601);
}

// ─────────────────────── framing ───────────────────────

#[test]
fn malformed_json_is_a_parse_error() {
    let err = framing::parse_message(r#"{"broken":"#).unwrap_err();
    assert_eq!(err.code(), -32700);
}

#[test]
fn empty_line_is_a_parse_error() {
    assert!(framing::parse_message("   ").is_err());
}

#[tokio::test]
async fn wrong_jsonrpc_version_is_rejected() {
    let (handler, _) = handler_with(StubModel::replying("a red ball"));
    let response = send(
        &handler,
        json!({ "jsonrpc": "1.0", "id": 1, "method": "ping" }),
    )
    .await;
    assert_eq!(error_code(&response), -32600);
}

#[tokio::test]
async fn ping_answers_without_configuration() {
    let (handler, _) = handler_with(StubModel::replying("a red ball"));
    let response = send(&handler, rpc_request(1, "ping", json!({}))).await;
    assert_eq!(response["result"], json!({}));
}
