//! Core types for the generation domain

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::generation::{AdditionalProperties, ApiSpec, CodegenConfig};

/// A configuration option a generator declares it recognizes.
///
/// Only declared options are copied over from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliOption {
    pub opt: String,
    pub description: String,
    pub default: Option<String>,
}

impl CliOption {
    pub fn new(opt: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            opt: opt.into(),
            description: description.into(),
            default: None,
        }
    }

    /// Set the value the generator uses when nothing overrides it
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A template rendered once per model or once per API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFile {
    /// Template file name, looked up in the template directory first
    pub template: &'static str,
    /// Appended to the generated file name (extension included)
    pub suffix: &'static str,
}

/// A template rendered exactly once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportingFile {
    pub template: &'static str,
    /// Folder relative to the output directory; empty for the root
    pub folder: PathBuf,
    pub destination: String,
}

impl SupportingFile {
    pub fn new(
        template: &'static str,
        folder: impl Into<PathBuf>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            template,
            folder: folder.into(),
            destination: destination.into(),
        }
    }

    /// Path of the generated file relative to the output directory
    pub fn relative_path(&self) -> PathBuf {
        self.folder.join(&self.destination)
    }
}

/// Generated artifact
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

/// Everything the engine needs for one generation run.
///
/// The option bag is an immutable snapshot; the engine never hands it back.
#[derive(Debug, Clone)]
pub struct ClientOptInput {
    pub config: Arc<dyn CodegenConfig>,
    pub output_dir: PathBuf,
    pub options: AdditionalProperties,
    pub spec: ApiSpec,
}

/// Result of generation
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    /// Files written, in generation order
    pub files: Vec<PathBuf>,
}
