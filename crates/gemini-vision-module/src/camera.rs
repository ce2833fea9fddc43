//! File-backed camera for local module runs.
//!
//! Real deployments get their cameras from the host; this one lets the
//! module be exercised standalone by pointing a camera name at an image
//! file on disk. The file is re-read on every fetch, so swapping the file
//! swaps the "live" frame.

use std::io::Cursor;
use std::path::PathBuf;

use async_trait::async_trait;
use image::ImageFormat;

use gemini_vision::{Camera, Frame, VisionError, VisionResult, MIME_JPEG};

/// A camera that serves frames from an image file.
pub struct FileCamera {
    name: String,
    path: PathBuf,
}

impl FileCamera {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl Camera for FileCamera {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_image(&self, mime_type: &str) -> VisionResult<Frame> {
        if mime_type != MIME_JPEG {
            return Err(VisionError::Camera(format!(
                "camera '{}' only serves {MIME_JPEG}, got '{mime_type}'",
                self.name
            )));
        }

        let path = self.path.clone();
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| VisionError::Camera(format!("read {}: {e}", path.display())))?;

        // JPEG files pass through untouched; anything else the image
        // crate can decode gets re-encoded.
        if bytes.starts_with(&[0xFF, 0xD8]) {
            return Ok(Frame::jpeg(bytes));
        }

        let img = image::load_from_memory(&bytes)
            .map_err(|e| VisionError::Camera(format!("decode {}: {e}", path.display())))?;
        let mut jpeg = Vec::new();
        img.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .map_err(|e| VisionError::Camera(format!("encode jpeg: {e}")))?;
        Ok(Frame::jpeg(jpeg))
    }
}
