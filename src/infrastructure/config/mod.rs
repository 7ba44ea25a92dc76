//! Generator config file loading
//!
//! A config file is a flat object of option names to values, JSON by
//! default and YAML when the file extension says so.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::generation::{CodegenOverrides, ConfigLoader, GenerationError};

/// Loads generator config files from disk
#[derive(Debug, Default)]
pub struct FileConfigLoader;

impl FileConfigLoader {
    pub fn new() -> Self {
        Self
    }

    fn is_yaml(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
    }

    /// Turn a decoded document into overrides
    pub fn overrides_from_value(
        value: JsonValue,
        path: &Path,
    ) -> Result<CodegenOverrides, GenerationError> {
        let JsonValue::Object(entries) = value else {
            return Err(GenerationError::ConfigFileError(format!(
                "{}: expected an object of option names to values",
                path.display()
            )));
        };

        let mut overrides = CodegenOverrides::new();
        for (name, value) in entries {
            match value {
                JsonValue::String(text) => overrides.set_option(name, text),
                JsonValue::Bool(flag) => overrides.set_option(name, flag.to_string()),
                JsonValue::Number(number) => overrides.set_option(name, number.to_string()),
                JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => {
                    debug!(option = %name, "Skipping non-scalar config value");
                }
            }
        }
        Ok(overrides)
    }
}

#[async_trait]
impl ConfigLoader for FileConfigLoader {
    async fn load(&self, path: &Path) -> Result<CodegenOverrides, GenerationError> {
        let content = fs::read_to_string(path).await?;

        let value: JsonValue = if Self::is_yaml(path) {
            serde_yaml::from_str(&content).map_err(|e| {
                GenerationError::ConfigFileError(format!("{}: {e}", path.display()))
            })?
        } else {
            serde_json::from_str(&content)?
        };

        let overrides = Self::overrides_from_value(value, path)?;
        debug!(path = %path.display(), options = overrides.len(), "Loaded config file");
        Ok(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[tokio::test]
    async fn test_json_config() {
        let file = write_config(".json", r#"{"modelPackage": "com.example.model"}"#);

        let overrides = FileConfigLoader::new().load(file.path()).await.unwrap();

        assert!(overrides.has_option("modelPackage"));
        assert_eq!(overrides.get_option("modelPackage"), Some("com.example.model"));
    }

    #[tokio::test]
    async fn test_yaml_config() {
        let file = write_config(".yml", "packageName: petstore\npackageVersion: 2.1.0\n");

        let overrides = FileConfigLoader::new().load(file.path()).await.unwrap();

        assert_eq!(overrides.get_option("packageName"), Some("petstore"));
        assert_eq!(overrides.get_option("packageVersion"), Some("2.1.0"));
    }

    #[tokio::test]
    async fn test_scalars_become_text_and_others_are_skipped() {
        let file = write_config(
            ".json",
            r#"{"hideGenerationTimestamp": true, "port": 8080, "nothing": null, "list": [1], "nested": {"a": "b"}}"#,
        );

        let overrides = FileConfigLoader::new().load(file.path()).await.unwrap();

        assert_eq!(overrides.get_option("hideGenerationTimestamp"), Some("true"));
        assert_eq!(overrides.get_option("port"), Some("8080"));
        assert!(!overrides.has_option("nothing"));
        assert!(!overrides.has_option("list"));
        assert!(!overrides.has_option("nested"));
        assert_eq!(overrides.len(), 2);
    }

    #[tokio::test]
    async fn test_non_object_root_is_rejected() {
        let file = write_config(".json", r#"["modelPackage"]"#);

        let result = FileConfigLoader::new().load(file.path()).await;
        assert!(matches!(result, Err(GenerationError::ConfigFileError(_))));
    }

    #[tokio::test]
    async fn test_malformed_json_propagates() {
        let file = write_config(".json", "{ not json");

        let result = FileConfigLoader::new().load(file.path()).await;
        assert!(matches!(result, Err(GenerationError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_missing_file_propagates_io_error() {
        let result = FileConfigLoader::new()
            .load(Path::new("/nonexistent/config.json"))
            .await;
        assert!(matches!(result, Err(GenerationError::IoError(_))));
    }
}
