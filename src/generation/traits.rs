//! Port interfaces for the generation domain

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::generation::utils::{to_camel_case, to_proper_case, to_snake_case};
use crate::generation::{
    AdditionalProperties, ApiSpec, Artifact, CliOption, ClientOptInput, CodegenOverrides,
    GenerationError, GenerationResult, SchemaType, SupportingFile, TemplateFile,
};

/// Extension point every generator implementation satisfies.
///
/// An implementation is identified by [`name`](CodegenConfig::name), declares
/// the configuration options it recognizes, and supplies the naming and type
/// mapping hooks the engine uses while rendering its templates.
pub trait CodegenConfig: Send + Sync + Debug {
    /// Name used to select this generator
    fn name(&self) -> &'static str;

    /// One-line description
    fn help(&self) -> &'static str;

    /// Options a config file may set for this generator
    fn cli_options(&self) -> Vec<CliOption>;

    /// Folder of the embedded templates for this generator
    fn embedded_template_dir(&self) -> &'static str {
        self.name()
    }

    fn model_templates(&self) -> Vec<TemplateFile>;

    fn api_templates(&self) -> Vec<TemplateFile>;

    fn supporting_files(&self, options: &AdditionalProperties) -> Vec<SupportingFile>;

    /// Model folder relative to the output directory
    fn model_folder(&self, options: &AdditionalProperties) -> PathBuf;

    /// API folder relative to the output directory
    fn api_folder(&self, options: &AdditionalProperties) -> PathBuf;

    /// Map a schema type to a type declaration in the target language
    fn type_declaration(&self, schema: &SchemaType) -> String;

    /// Imports a model or API file needs for `schema`
    fn imports_for(&self, _schema: &SchemaType, _options: &AdditionalProperties) -> Vec<String> {
        Vec::new()
    }

    fn to_model_name(&self, name: &str) -> String {
        to_proper_case(name)
    }

    fn to_model_filename(&self, name: &str) -> String {
        to_snake_case(name)
    }

    fn to_api_name(&self, tag: &str) -> String {
        format!("{}Api", to_proper_case(tag))
    }

    fn to_api_filename(&self, tag: &str) -> String {
        format!("{}_api", to_snake_case(tag))
    }

    fn to_var_name(&self, name: &str) -> String {
        to_camel_case(name)
    }

    fn to_operation_name(&self, operation_id: &str) -> String {
        to_camel_case(operation_id)
    }

    /// The option bag before any override: every declared default
    fn default_options(&self) -> AdditionalProperties {
        self.cli_options()
            .into_iter()
            .filter_map(|option| {
                option
                    .default
                    .map(|value| (option.opt, serde_json::Value::String(value)))
            })
            .collect()
    }
}

/// Loads and parses an API specification
#[async_trait]
pub trait SpecLoader: Send + Sync {
    /// Load a specification from a file path or URL
    async fn load(&self, source: &str) -> Result<ApiSpec, GenerationError>;
}

/// Parses a generator config file into option overrides
#[async_trait]
pub trait ConfigLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<CodegenOverrides, GenerationError>;
}

/// The generation engine
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Generate sources for `input` into its output directory
    async fn generate(&self, input: ClientOptInput) -> Result<GenerationResult, GenerationError>;
}

/// Writes generated artifacts to their destination
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write all artifacts, creating parent directories as needed
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), GenerationError>;

    /// Ensure a directory exists
    async fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError>;
}
