//! The default generation engine
//!
//! Renders a generator's model, API and supporting templates with Tera and
//! writes the results through an [`OutputService`].

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};
use std::path::PathBuf;
use std::sync::Arc;
use tera::Tera;
use tracing::{debug, info};

use super::TemplateLoader;
use crate::generation::{
    AdditionalProperties, ApiSpec, Artifact, ClientOptInput, CodeGenerator, CodegenConfig,
    GenerationError, GenerationResult, OutputService, RenderContext, api_context, model_context,
};
use crate::infrastructure::output::FileSystemOutputService;

/// Tera-backed implementation of the generation engine
pub struct DefaultGenerator {
    output: Arc<dyn OutputService>,
}

impl DefaultGenerator {
    pub fn new(output: Arc<dyn OutputService>) -> Self {
        Self { output }
    }

    /// Add the keys every template may rely on, keeping user-supplied values
    fn engine_options(
        config: &dyn CodegenConfig,
        mut options: AdditionalProperties,
        spec: &ApiSpec,
    ) -> AdditionalProperties {
        options.insert_missing("generatorName", json!(config.name()));
        options.insert_missing("generatedDate", json!(chrono::Utc::now().to_rfc3339()));
        options.insert_missing("appName", json!(spec.info.title));
        options.insert_missing("appVersion", json!(spec.info.version));
        options.insert_missing("basePath", json!(spec.base_path));
        options
    }

    fn render(
        tera: &Tera,
        template: &str,
        context: &RenderContext,
        path: PathBuf,
    ) -> Result<Artifact, GenerationError> {
        let content = tera
            .render(template, &context.to_tera_context())
            .map_err(|e| {
                GenerationError::RenderError(format!(
                    "Failed to render {template} for {}: {e}",
                    path.display()
                ))
            })?;

        Ok(Artifact {
            path,
            content,
        })
    }

    fn file_name(context: &JsonValue) -> Result<&str, GenerationError> {
        context["file_name"]
            .as_str()
            .ok_or_else(|| GenerationError::RenderError("Context has no file name".to_string()))
    }
}

impl Default for DefaultGenerator {
    fn default() -> Self {
        Self::new(Arc::new(FileSystemOutputService::new()))
    }
}

#[async_trait]
impl CodeGenerator for DefaultGenerator {
    async fn generate(&self, input: ClientOptInput) -> Result<GenerationResult, GenerationError> {
        let ClientOptInput {
            config,
            output_dir,
            options,
            spec,
        } = input;
        let config = config.as_ref();
        let options = Self::engine_options(config, options, &spec);

        let model_templates = config.model_templates();
        let api_templates = config.api_templates();
        let supporting_files = config.supporting_files(&options);

        let loader = TemplateLoader::new(config, &options);
        let template_names: Vec<&'static str> = model_templates
            .iter()
            .chain(&api_templates)
            .map(|t| t.template)
            .chain(supporting_files.iter().map(|f| f.template))
            .collect();
        let tera = loader.build_tera(template_names).await?;

        let models: Vec<JsonValue> = spec
            .models
            .iter()
            .map(|model| model_context(config, &options, model))
            .collect();
        let apis: Vec<JsonValue> = spec
            .tags()
            .into_iter()
            .map(|tag| api_context(config, &options, tag, spec.operations_for_tag(tag)))
            .collect();

        let mut base = RenderContext::from_options(&options);
        base.add_variable("models", JsonValue::Array(models.clone()));
        base.add_variable("apis", JsonValue::Array(apis.clone()));

        let mut artifacts = Vec::new();

        let model_dir = output_dir.join(config.model_folder(&options));
        for model in &models {
            let mut context = base.clone();
            context.add_variable("model", model.clone());
            for template in &model_templates {
                let path = model_dir.join(format!("{}{}", Self::file_name(model)?, template.suffix));
                artifacts.push(Self::render(&tera, template.template, &context, path)?);
            }
        }

        let api_dir = output_dir.join(config.api_folder(&options));
        for api in &apis {
            let mut context = base.clone();
            context.add_variable("api", api.clone());
            for template in &api_templates {
                let path = api_dir.join(format!("{}{}", Self::file_name(api)?, template.suffix));
                artifacts.push(Self::render(&tera, template.template, &context, path)?);
            }
        }

        for file in &supporting_files {
            let path = output_dir.join(file.relative_path());
            artifacts.push(Self::render(&tera, file.template, &base, path)?);
        }

        debug!(
            generator = config.name(),
            models = models.len(),
            apis = apis.len(),
            supporting = supporting_files.len(),
            "Rendered templates"
        );

        self.output.ensure_directory(&output_dir).await?;
        self.output.write_artifacts(&artifacts).await?;

        let files: Vec<PathBuf> = artifacts.into_iter().map(|a| a.path).collect();
        info!(
            generator = config.name(),
            output = %output_dir.display(),
            files = files.len(),
            "Generated sources"
        );

        Ok(GenerationResult { files })
    }
}
