//! Gemini vision module — a vision service backed by Gemini, served to
//! host frameworks as JSON-RPC over stdio.

pub mod camera;
pub mod config;
pub mod protocol;
pub mod transport;
pub mod types;

pub use camera::FileCamera;
pub use config::build_camera_registry;
pub use protocol::VisionHandler;
pub use transport::StdioTransport;

/// Model triplet this module registers under.
pub const MODEL_TRIPLET: &str = "bill:gemini:vision";

/// Every RPC method the module serves.
pub const SERVED_METHODS: &[&str] = &[
    "validate_config",
    "configure",
    "vision/get_classifications",
    "vision/get_classifications_from_camera",
    "vision/get_description",
    "vision/get_description_from_camera",
    "vision/capture_all_from_camera",
    "vision/get_properties",
    "vision/get_detections",
    "vision/get_detections_from_camera",
    "vision/get_object_point_clouds",
    "vision/do_command",
    "ping",
    "shutdown",
];
