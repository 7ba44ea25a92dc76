//! Data transfer objects for the application layer

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::application::ValidationError;

/// Parameters of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenRequest {
    /// Name (or type identifier) of the generator to run
    pub lang: String,
    /// Path or URL of the specification
    pub input_spec: String,
    pub output: PathBuf,
    pub template_directory: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub add_compile_source_root: bool,
}

impl CodegenRequest {
    pub fn new(
        lang: impl Into<String>,
        input_spec: impl Into<String>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            lang: lang.into(),
            input_spec: input_spec.into(),
            output: output.into(),
            template_directory: None,
            config_file: None,
            add_compile_source_root: true,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lang.trim().is_empty() {
            return Err(ValidationError::MissingField("language"));
        }
        if self.input_spec.trim().is_empty() {
            return Err(ValidationError::MissingField("inputSpec"));
        }
        Ok(())
    }
}

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct CodegenResponse {
    pub generator: String,
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub source_root_registered: bool,
}

/// Goal configuration as written in a project's build file.
///
/// Every field is optional so command-line flags can fill the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PluginConfig {
    #[serde(alias = "lang")]
    pub language: Option<String>,
    pub input_spec: Option<String>,
    pub output: Option<PathBuf>,
    pub template_directory: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub add_compile_source_root: Option<bool>,
}

impl PluginConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ValidationError> {
        serde_yaml::from_str(content)
            .map_err(|e| ValidationError::InvalidConfiguration(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::InvalidConfiguration(format!("{}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Fill every field `other` sets, keeping the rest
    pub fn merge(self, other: PluginConfig) -> Self {
        Self {
            language: other.language.or(self.language),
            input_spec: other.input_spec.or(self.input_spec),
            output: other.output.or(self.output),
            template_directory: other.template_directory.or(self.template_directory),
            config_file: other.config_file.or(self.config_file),
            add_compile_source_root: other.add_compile_source_root.or(self.add_compile_source_root),
        }
    }

    /// Build a request, writing to `default_output` when no output is set
    pub fn into_request(self, default_output: PathBuf) -> Result<CodegenRequest, ValidationError> {
        let request = CodegenRequest {
            lang: self
                .language
                .ok_or(ValidationError::MissingField("language"))?,
            input_spec: self
                .input_spec
                .ok_or(ValidationError::MissingField("inputSpec"))?,
            output: self.output.unwrap_or(default_output),
            template_directory: self.template_directory,
            config_file: self.config_file,
            add_compile_source_root: self.add_compile_source_root.unwrap_or(true),
        };
        request.validate()?;
        Ok(request)
    }
}
