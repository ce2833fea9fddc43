//! Camera collaborator interface and dependency resolution.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{VisionError, VisionResult};
use crate::types::Frame;

/// A host-owned camera the adapter can fetch frames from.
///
/// The adapter never implements a camera; it only consumes one that the
/// host resolved and injected at configuration time.
#[async_trait]
pub trait Camera: Send + Sync {
    /// The resource name this camera was registered under.
    fn name(&self) -> &str;

    /// Fetch a single frame in the requested mime type. May suspend on
    /// the camera's own I/O.
    async fn get_image(&self, mime_type: &str) -> VisionResult<Frame>;
}

/// Resolved camera dependencies, keyed by resource name.
///
/// Populated by the host (or the module entry point) before `configure`,
/// then snapshotted into the service. Lookups at request time fail with
/// [`VisionError::DependencyNotFound`].
#[derive(Clone, Default)]
pub struct CameraRegistry {
    cameras: HashMap<String, Arc<dyn Camera>>,
}

impl CameraRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, camera: Arc<dyn Camera>) {
        self.cameras.insert(camera.name().to_string(), camera);
    }

    pub fn get(&self, name: &str) -> VisionResult<Arc<dyn Camera>> {
        self.cameras
            .get(name)
            .cloned()
            .ok_or_else(|| VisionError::DependencyNotFound(name.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.cameras.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}

impl std::fmt::Debug for CameraRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraRegistry")
            .field("cameras", &self.names())
            .finish()
    }
}
