//! Decoding of raw specification documents
//!
//! Loaders only fetch bytes; this module turns them into an [`ApiSpec`].

use serde_json::Value as JsonValue;

use crate::generation::{ApiSpec, GenerationError};

/// Serialization format of a specification document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    /// Unknown: JSON is tried first, then YAML
    Detect,
}

impl DocumentFormat {
    /// Guess the format from a path or URL
    pub fn from_location(location: &str) -> Self {
        let location = location.split(['?', '#']).next().unwrap_or(location);
        if location.ends_with(".json") {
            DocumentFormat::Json
        } else if location.ends_with(".yaml") || location.ends_with(".yml") {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Detect
        }
    }

    /// Guess the format from an HTTP content type
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        if content_type.contains("json") {
            Some(DocumentFormat::Json)
        } else if content_type.contains("yaml") {
            Some(DocumentFormat::Yaml)
        } else {
            None
        }
    }
}

/// Decode `content` and parse it as a specification
pub fn parse_spec(content: &str, format: DocumentFormat) -> Result<ApiSpec, GenerationError> {
    let document: JsonValue = match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| GenerationError::LoadError(format!("Failed to parse YAML: {e}")))?,
        DocumentFormat::Detect => serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| GenerationError::LoadError(format!("Failed to parse specification: {e}")))?,
    };

    ApiSpec::from_value(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_location() {
        assert_eq!(DocumentFormat::from_location("api.json"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_location("api.yml"), DocumentFormat::Yaml);
        assert_eq!(
            DocumentFormat::from_location("https://host/api.yaml?version=2"),
            DocumentFormat::Yaml
        );
        assert_eq!(DocumentFormat::from_location("https://host/spec"), DocumentFormat::Detect);
    }

    #[test]
    fn test_format_from_content_type() {
        assert_eq!(
            DocumentFormat::from_content_type("application/json; charset=utf-8"),
            Some(DocumentFormat::Json)
        );
        assert_eq!(
            DocumentFormat::from_content_type("application/x-yaml"),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(DocumentFormat::from_content_type("text/plain"), None);
    }

    #[test]
    fn test_detect_falls_back_to_yaml() {
        let spec = parse_spec(
            "swagger: '2.0'\ninfo:\n  title: Detected\n  version: 0.1.0\n",
            DocumentFormat::Detect,
        )
        .unwrap();
        assert_eq!(spec.info.title, "Detected");
    }

    #[test]
    fn test_invalid_json_is_a_serialization_error() {
        let result = parse_spec("{ not json", DocumentFormat::Json);
        assert!(matches!(result, Err(GenerationError::SerializationError(_))));
    }
}
