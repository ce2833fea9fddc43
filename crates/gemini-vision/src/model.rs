//! Description-model collaborator interface.

use async_trait::async_trait;

use crate::error::VisionResult;
use crate::types::Frame;

/// A one-shot multimodal model: image plus prompt in, text out.
///
/// The production implementation is [`crate::gemini::GeminiClient`]; tests
/// substitute mocks through the same seam.
#[async_trait]
pub trait DescriptionModel: Send + Sync {
    /// Issue a single generation request. No retry, no backoff; failures
    /// propagate unchanged to the caller.
    async fn describe(&self, frame: &Frame, prompt: &str) -> VisionResult<String>;
}
