//! CLI-side camera wiring for local runs.

use std::sync::Arc;

use gemini_vision::CameraRegistry;

use crate::camera::FileCamera;
use crate::types::{ModuleError, ModuleResult};

/// Parse repeated `--camera name=path` specs into a registry of
/// file-backed cameras.
pub fn build_camera_registry(specs: &[String]) -> ModuleResult<CameraRegistry> {
    let mut registry = CameraRegistry::new();
    for spec in specs {
        let (name, path) = spec.split_once('=').ok_or_else(|| {
            ModuleError::InvalidRequest(format!(
                "camera spec '{spec}' must be of the form name=path"
            ))
        })?;
        let name = name.trim();
        let path = path.trim();
        if name.is_empty() || path.is_empty() {
            return Err(ModuleError::InvalidRequest(format!(
                "camera spec '{spec}' must be of the form name=path"
            )));
        }
        registry.register(Arc::new(FileCamera::new(name, path)));
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_specs() {
        let registry = build_camera_registry(&[
            "cam1=/tmp/a.jpg".to_string(),
            "cam2 = /tmp/b.png".to_string(),
        ])
        .unwrap();
        assert_eq!(registry.names(), vec!["cam1".to_string(), "cam2".to_string()]);
    }

    #[test]
    fn rejects_malformed_specs() {
        assert!(build_camera_registry(&["cam1".to_string()]).is_err());
        assert!(build_camera_registry(&["=path".to_string()]).is_err());
        assert!(build_camera_registry(&["cam1=".to_string()]).is_err());
    }

    #[test]
    fn empty_specs_give_empty_registry() {
        let registry = build_camera_registry(&[]).unwrap();
        assert!(registry.is_empty());
    }
}
