//! Template lookup: user template directory first, embedded templates second

use rust_embed::RustEmbed;
use std::path::PathBuf;
use tera::Tera;
use tokio::fs;
use tracing::debug;

use crate::generation::{AdditionalProperties, CodegenConfig, GenerationError};

/// Templates for every built-in generator, compiled into the binary
#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Where a template was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    UserDirectory(PathBuf),
    Embedded(String),
}

/// Resolves template files for one generator run
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    user_dir: Option<PathBuf>,
    embedded_dir: &'static str,
}

impl TemplateLoader {
    pub fn new(config: &dyn CodegenConfig, options: &AdditionalProperties) -> Self {
        Self {
            user_dir: options.template_dir(),
            embedded_dir: config.embedded_template_dir(),
        }
    }

    /// Load a template by file name, returning its content and origin
    pub async fn load(&self, name: &str) -> Result<(String, TemplateSource), GenerationError> {
        if let Some(dir) = &self.user_dir {
            let candidate = dir.join(name);
            if fs::metadata(&candidate).await.is_ok_and(|meta| meta.is_file()) {
                let content = fs::read_to_string(&candidate).await?;
                return Ok((content, TemplateSource::UserDirectory(candidate)));
            }
        }

        let embedded_path = format!("{}/{}", self.embedded_dir, name);
        let file = EmbeddedTemplates::get(&embedded_path).ok_or_else(|| {
            GenerationError::TemplateError(format!(
                "Template '{name}' not found in {} or the embedded '{}' templates",
                self.user_dir
                    .as_ref()
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_else(|| "<no template directory>".to_string()),
                self.embedded_dir
            ))
        })?;
        let content = String::from_utf8(file.data.into_owned()).map_err(|e| {
            GenerationError::TemplateError(format!("Template {embedded_path} is not UTF-8: {e}"))
        })?;

        Ok((content, TemplateSource::Embedded(embedded_path)))
    }

    /// Build a Tera instance holding every named template
    pub async fn build_tera<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Tera, GenerationError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        for name in names {
            if tera.get_template_names().any(|existing| existing == name) {
                continue;
            }
            let (content, source) = self.load(name).await?;
            debug!(template = name, ?source, "Loaded template");
            tera.add_raw_template(name, &content).map_err(|e| {
                GenerationError::TemplateError(format!("Failed to parse template {name}: {e}"))
            })?;
        }

        Ok(tera)
    }
}
