//! Typed configuration parsed from the host's raw attribute map.

use serde_json::{Map, Value};

use crate::error::{VisionError, VisionResult};

/// Caption prompt used when the configuration does not supply one.
pub const DEFAULT_PROMPT: &str = "Describe this image in one concise English sentence.";

/// Attributes that must be present as non-empty strings.
const REQUIRED_KEYS: [&str; 3] = ["api_key", "camera_name", "model"];

/// Validated adapter configuration.
///
/// Built once per configuration event and replaced wholesale on
/// reconfigure; there is no partial update.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub api_key: String,
    pub camera_name: String,
    pub model: String,
    pub prompt: String,
}

impl VisionConfig {
    /// Check a raw attribute map and return the resource names the host
    /// must resolve and inject before `configure` runs (just the camera).
    ///
    /// Fails naming the first missing or malformed key. No side effects.
    pub fn validate(attributes: &Map<String, Value>) -> VisionResult<Vec<String>> {
        for key in REQUIRED_KEYS {
            required_string(attributes, key)?;
        }
        let camera_name = required_string(attributes, "camera_name")?;
        Ok(vec![camera_name.to_string()])
    }

    /// Parse the raw attribute map into a typed configuration.
    ///
    /// Assumes `validate` already ran; a missing key here is still an
    /// error, never a silent default. Only the optional `prompt` falls
    /// back to [`DEFAULT_PROMPT`].
    pub fn from_attributes(attributes: &Map<String, Value>) -> VisionResult<Self> {
        let api_key = required_string(attributes, "api_key")?;
        let camera_name = required_string(attributes, "camera_name")?;
        let model = required_string(attributes, "model")?;
        let prompt = match attributes.get("prompt") {
            Some(value) => as_string(value, "prompt")?,
            None => DEFAULT_PROMPT,
        };

        Ok(Self {
            api_key: api_key.to_string(),
            camera_name: camera_name.to_string(),
            model: model.to_string(),
            prompt: prompt.to_string(),
        })
    }
}

fn required_string<'a>(attributes: &'a Map<String, Value>, key: &str) -> VisionResult<&'a str> {
    match attributes.get(key) {
        None => Err(VisionError::MissingAttribute(key.to_string())),
        Some(value) => as_string(value, key),
    }
}

fn as_string<'a>(value: &'a Value, key: &str) -> VisionResult<&'a str> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(VisionError::InvalidAttribute(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn full() -> Map<String, Value> {
        attrs(json!({
            "api_key": "k",
            "camera_name": "cam1",
            "model": "gemini-2.0-flash",
            "prompt": "describe"
        }))
    }

    #[test]
    fn validate_returns_camera_dependency() {
        let deps = VisionConfig::validate(&full()).unwrap();
        assert_eq!(deps, vec!["cam1".to_string()]);
    }

    #[test]
    fn validate_names_each_missing_key() {
        for key in ["api_key", "camera_name", "model"] {
            let mut map = full();
            map.remove(key);
            match VisionConfig::validate(&map) {
                Err(VisionError::MissingAttribute(k)) => assert_eq!(k, key),
                other => panic!("expected MissingAttribute({key}), got {other:?}"),
            }
        }
    }

    #[test]
    fn validate_rejects_empty_and_non_string_values() {
        let mut map = full();
        map.insert("api_key".to_string(), json!(""));
        assert!(matches!(
            VisionConfig::validate(&map),
            Err(VisionError::InvalidAttribute(k)) if k == "api_key"
        ));

        let mut map = full();
        map.insert("model".to_string(), json!(42));
        assert!(matches!(
            VisionConfig::validate(&map),
            Err(VisionError::InvalidAttribute(k)) if k == "model"
        ));
    }

    #[test]
    fn prompt_is_optional_with_default() {
        let mut map = full();
        map.remove("prompt");
        let config = VisionConfig::from_attributes(&map).unwrap();
        assert_eq!(config.prompt, DEFAULT_PROMPT);

        let config = VisionConfig::from_attributes(&full()).unwrap();
        assert_eq!(config.prompt, "describe");
    }

    #[test]
    fn parse_fails_on_missing_required_key() {
        let mut map = full();
        map.remove("camera_name");
        assert!(matches!(
            VisionConfig::from_attributes(&map),
            Err(VisionError::MissingAttribute(k)) if k == "camera_name"
        ));
    }
}
