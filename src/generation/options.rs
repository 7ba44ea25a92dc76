//! The generator option bag and the steps that build it.
//!
//! A run's options are assembled once, in a fixed order, by
//! [`OptionsBuilder`]:
//!
//! 1. the generator's declared defaults,
//! 2. config-file overrides, restricted to the options the generator declares,
//! 3. the explicit template directory, if one was given.
//!
//! The result is an [`AdditionalProperties`] snapshot handed by value to the
//! engine.

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::generation::CodegenConfig;

/// Option key holding the user template directory
pub const TEMPLATE_DIR: &str = "templateDir";

/// Flat, string-keyed option map read by the generation engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AdditionalProperties(BTreeMap<String, JsonValue>);

impl AdditionalProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Value of `key` when it holds a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(JsonValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.0.iter()
    }

    /// The user template directory, when one was configured
    pub fn template_dir(&self) -> Option<PathBuf> {
        self.get_str(TEMPLATE_DIR).map(PathBuf::from)
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.0.insert(key.into(), value)
    }

    /// Insert only when the key is not set yet
    pub(crate) fn insert_missing(&mut self, key: &str, value: JsonValue) {
        self.0.entry(key.to_string()).or_insert(value);
    }
}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for AdditionalProperties {
    fn from_iter<I: IntoIterator<Item = (K, JsonValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Option values parsed from a generator config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodegenOverrides {
    options: BTreeMap<String, String>,
}

impl CodegenOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn get_option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.options.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CodegenOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            options: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Assembles the option bag for a resolved generator
pub struct OptionsBuilder<'a> {
    config: &'a dyn CodegenConfig,
    properties: AdditionalProperties,
    template_dir: Option<PathBuf>,
    overlaid_template_dir: bool,
}

impl<'a> OptionsBuilder<'a> {
    /// Start from the generator's declared defaults
    pub fn new(config: &'a dyn CodegenConfig) -> Self {
        Self {
            config,
            properties: config.default_options(),
            template_dir: None,
            overlaid_template_dir: false,
        }
    }

    /// Use templates from `dir` ahead of the embedded ones.
    ///
    /// Expects an absolute path. Takes precedence over a `templateDir` value
    /// from a config file.
    pub fn template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Copy every option the generator declares and `overrides` defines
    pub fn overlay(mut self, overrides: &CodegenOverrides) -> Self {
        for option in self.config.cli_options() {
            let Some(value) = overrides.get_option(&option.opt) else {
                continue;
            };
            debug!(
                generator = self.config.name(),
                option = %option.opt,
                value,
                "Applying config file option"
            );
            if option.opt == TEMPLATE_DIR {
                self.overlaid_template_dir = true;
            }
            self.properties
                .insert(option.opt.clone(), JsonValue::String(value.to_string()));
        }
        self
    }

    pub fn build(mut self) -> AdditionalProperties {
        if let Some(dir) = self.template_dir {
            let dir = dir.to_string_lossy().to_string();
            if self.overlaid_template_dir {
                warn!(
                    template_dir = %dir,
                    discarded = ?self.properties.get_str(TEMPLATE_DIR),
                    "Template directory parameter overrides templateDir from config file"
                );
            }
            self.properties.insert(TEMPLATE_DIR, JsonValue::String(dir));
        }
        self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{GoCodegen, JavaCodegen};
    use serde_json::json;

    #[test]
    fn test_builder_starts_from_declared_defaults() {
        let config = GoCodegen::default();
        let options = OptionsBuilder::new(&config).build();

        assert_eq!(options.get_str("packageName"), Some("swagger"));
        assert_eq!(options.get_str("packageVersion"), Some("1.0.0"));
        assert!(!options.contains_key(TEMPLATE_DIR));
    }

    #[test]
    fn test_overlay_copies_declared_option() {
        let config = JavaCodegen::default();
        let overrides: CodegenOverrides = [("modelPackage", "com.example.model")]
            .into_iter()
            .collect();

        let options = OptionsBuilder::new(&config).overlay(&overrides).build();

        assert_eq!(options.get_str("modelPackage"), Some("com.example.model"));
    }

    #[test]
    fn test_overlay_ignores_undeclared_option() {
        let config = GoCodegen::default();
        let overrides: CodegenOverrides = [("modelPackage", "com.example.model")]
            .into_iter()
            .collect();

        let options = OptionsBuilder::new(&config).overlay(&overrides).build();

        assert!(!options.contains_key("modelPackage"));
    }

    #[test]
    fn test_overlay_leaves_absent_options_untouched() {
        let config = JavaCodegen::default();
        let overrides: CodegenOverrides = [("apiPackage", "com.example.api")]
            .into_iter()
            .collect();

        let options = OptionsBuilder::new(&config).overlay(&overrides).build();

        assert_eq!(options.get_str("apiPackage"), Some("com.example.api"));
        assert_eq!(options.get_str("modelPackage"), Some("io.swagger.client.model"));
    }

    #[test]
    fn test_template_dir_is_recorded() {
        let config = GoCodegen::default();
        let options = OptionsBuilder::new(&config)
            .template_dir("/opt/templates/go")
            .build();

        assert_eq!(options.get_str(TEMPLATE_DIR), Some("/opt/templates/go"));
        assert_eq!(options.template_dir(), Some(PathBuf::from("/opt/templates/go")));
    }

    #[test]
    fn test_template_dir_wins_over_config_file() {
        let config = GoCodegen::default();
        let overrides: CodegenOverrides = [
            (TEMPLATE_DIR, "/from/config"),
            ("packageName", "petstore"),
        ]
        .into_iter()
        .collect();

        let options = OptionsBuilder::new(&config)
            .template_dir("/from/parameter")
            .overlay(&overrides)
            .build();

        assert_eq!(options.get_str(TEMPLATE_DIR), Some("/from/parameter"));
        assert_eq!(options.get_str("packageName"), Some("petstore"));
    }

    #[test]
    fn test_config_file_template_dir_applies_without_parameter() {
        let config = GoCodegen::default();
        let overrides: CodegenOverrides = [(TEMPLATE_DIR, "/from/config")].into_iter().collect();

        let options = OptionsBuilder::new(&config).overlay(&overrides).build();

        assert_eq!(options.get_str(TEMPLATE_DIR), Some("/from/config"));
    }

    #[test]
    fn test_additional_properties_from_iter() {
        let props: AdditionalProperties = [("a", json!("1")), ("b", json!(true))]
            .into_iter()
            .collect();

        assert_eq!(props.len(), 2);
        assert_eq!(props.get_str("a"), Some("1"));
        assert_eq!(props.get("b"), Some(&json!(true)));
        assert_eq!(props.get_str("b"), None);
    }

    #[test]
    fn test_overrides_lookup() {
        let mut overrides = CodegenOverrides::new();
        assert!(overrides.is_empty());

        overrides.set_option("packageName", "petstore");
        assert!(overrides.has_option("packageName"));
        assert!(!overrides.has_option("PackageName"));
        assert_eq!(overrides.get_option("packageName"), Some("petstore"));
        assert_eq!(overrides.len(), 1);
    }
}
