//! The code generation goal: load, resolve, configure, generate, register

use std::sync::Arc;
use tracing::{debug, info};

use crate::application::{ApplicationError, BuildHost, CodegenRequest, CodegenResponse};
use crate::generation::{
    ClientOptInput, CodeGenerator, ConfigLoader, GenerationError, OptionsBuilder, SpecLoader,
};
use crate::generators::GeneratorRegistry;

/// Runs one generator over one specification
pub struct CodeGenGoal {
    registry: Arc<GeneratorRegistry>,
    spec_loader: Arc<dyn SpecLoader>,
    config_loader: Arc<dyn ConfigLoader>,
    generator: Arc<dyn CodeGenerator>,
}

impl CodeGenGoal {
    pub fn new(
        registry: Arc<GeneratorRegistry>,
        spec_loader: Arc<dyn SpecLoader>,
        config_loader: Arc<dyn ConfigLoader>,
        generator: Arc<dyn CodeGenerator>,
    ) -> Self {
        Self {
            registry,
            spec_loader,
            config_loader,
            generator,
        }
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub async fn execute(
        &self,
        request: CodegenRequest,
        host: &mut dyn BuildHost,
    ) -> Result<CodegenResponse, ApplicationError> {
        // 1. Validate request
        request.validate()?;
        info!(
            generator = %request.lang,
            input_spec = %request.input_spec,
            output = %request.output.display(),
            "Running code generation"
        );

        // 2. Load the specification
        let spec = self.spec_loader.load(&request.input_spec).await?;

        // 3. Resolve the generator
        let config = self.registry.resolve(&request.lang)?;

        // 4. Assemble options: defaults, template directory, config file
        let mut options = OptionsBuilder::new(config.as_ref());
        if let Some(dir) = &request.template_directory {
            let dir = std::path::absolute(dir).map_err(GenerationError::from)?;
            debug!(template_dir = %dir.display(), "Using template directory");
            options = options.template_dir(dir);
        }
        if let Some(path) = &request.config_file {
            let overrides = self.config_loader.load(path).await?;
            options = options.overlay(&overrides);
        }
        let options = options.build();

        // 5. Generate into an absolute output directory
        let output = std::path::absolute(&request.output).map_err(GenerationError::from)?;
        let generator = config.name().to_string();
        let result = self
            .generator
            .generate(ClientOptInput {
                config,
                output_dir: output.clone(),
                options,
                spec,
            })
            .await?;

        // 6. Hand the output to the build
        if request.add_compile_source_root {
            host.add_compile_source_root(&output)
                .map_err(|source| ApplicationError::SourceRoot {
                    path: output.clone(),
                    source,
                })?;
            info!(root = %output.display(), "Registered compile source root");
        } else {
            debug!("Compile source root registration disabled");
        }

        Ok(CodegenResponse {
            generator,
            output_dir: output,
            files: result.files,
            source_root_registered: request.add_compile_source_root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{
        AdditionalProperties, ApiInfo, ApiSpec, CodegenOverrides, GenerationResult, TEMPLATE_DIR,
    };
    use async_trait::async_trait;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    struct MockSpecLoader;

    #[async_trait]
    impl SpecLoader for MockSpecLoader {
        async fn load(&self, source: &str) -> Result<ApiSpec, GenerationError> {
            if source == "missing.yaml" {
                return Err(GenerationError::LoadError("no such file".to_string()));
            }
            Ok(ApiSpec {
                version: "2.0".to_string(),
                info: ApiInfo {
                    title: "Test API".to_string(),
                    version: "1.0.0".to_string(),
                    description: None,
                },
                base_path: "/".to_string(),
                models: vec![],
                operations: vec![],
            })
        }
    }

    struct MockConfigLoader(CodegenOverrides);

    #[async_trait]
    impl ConfigLoader for MockConfigLoader {
        async fn load(&self, _path: &Path) -> Result<CodegenOverrides, GenerationError> {
            Ok(self.0.clone())
        }
    }

    /// Records the options each run received
    #[derive(Default)]
    struct CapturingGenerator {
        seen: Mutex<Vec<(String, AdditionalProperties)>>,
    }

    #[async_trait]
    impl CodeGenerator for CapturingGenerator {
        async fn generate(
            &self,
            input: ClientOptInput,
        ) -> Result<GenerationResult, GenerationError> {
            self.seen
                .lock()
                .unwrap()
                .push((input.config.name().to_string(), input.options));
            Ok(GenerationResult {
                files: vec![input.output_dir.join("README.md")],
            })
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl CodeGenerator for FailingGenerator {
        async fn generate(&self, _input: ClientOptInput) -> Result<GenerationResult, GenerationError> {
            Err(GenerationError::RenderError("template exploded".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        roots: Vec<PathBuf>,
    }

    impl BuildHost for RecordingHost {
        fn add_compile_source_root(&mut self, root: &Path) -> io::Result<()> {
            self.roots.push(root.to_path_buf());
            Ok(())
        }
    }

    struct BrokenHost;

    impl BuildHost for BrokenHost {
        fn add_compile_source_root(&mut self, _root: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn goal(
        overrides: CodegenOverrides,
        generator: Arc<dyn CodeGenerator>,
    ) -> CodeGenGoal {
        CodeGenGoal::new(
            Arc::new(GeneratorRegistry::with_defaults()),
            Arc::new(MockSpecLoader),
            Arc::new(MockConfigLoader(overrides)),
            generator,
        )
    }

    #[tokio::test]
    async fn test_execute_registers_source_root_once() {
        let generator = Arc::new(CapturingGenerator::default());
        let goal = goal(CodegenOverrides::new(), generator.clone());
        let mut host = RecordingHost::default();

        let response = goal
            .execute(CodegenRequest::new("go", "petstore.yaml", "/out"), &mut host)
            .await
            .unwrap();

        assert_eq!(host.roots, vec![PathBuf::from("/out")]);
        assert!(response.source_root_registered);
        assert_eq!(response.generator, "go");
        assert_eq!(response.files, vec![PathBuf::from("/out/README.md")]);
        assert_eq!(generator.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_without_source_root() {
        let goal = goal(CodegenOverrides::new(), Arc::new(CapturingGenerator::default()));
        let mut host = RecordingHost::default();
        let mut request = CodegenRequest::new("go", "petstore.yaml", "/out");
        request.add_compile_source_root = false;

        let response = goal.execute(request, &mut host).await.unwrap();

        assert!(host.roots.is_empty());
        assert!(!response.source_root_registered);
    }

    #[tokio::test]
    async fn test_config_file_applies_declared_options_only() {
        let overrides: CodegenOverrides = [("modelPackage", "com.example.model")]
            .into_iter()
            .collect();

        for (lang, expected) in [("java", Some("com.example.model")), ("go", None)] {
            let generator = Arc::new(CapturingGenerator::default());
            let goal = goal(overrides.clone(), generator.clone());
            let mut request = CodegenRequest::new(lang, "petstore.yaml", "/out");
            request.config_file = Some(PathBuf::from("config.json"));

            goal.execute(request, &mut RecordingHost::default())
                .await
                .unwrap();

            let seen = generator.seen.lock().unwrap();
            assert_eq!(seen[0].0, lang);
            assert_eq!(seen[0].1.get_str("modelPackage"), expected);
        }
    }

    #[tokio::test]
    async fn test_template_directory_is_absolute() {
        let generator = Arc::new(CapturingGenerator::default());
        let goal = goal(CodegenOverrides::new(), generator.clone());
        let mut request = CodegenRequest::new("go", "petstore.yaml", "/out");
        request.template_directory = Some(PathBuf::from("custom-templates"));

        goal.execute(request, &mut RecordingHost::default())
            .await
            .unwrap();

        let seen = generator.seen.lock().unwrap();
        let dir = PathBuf::from(seen[0].1.get_str(TEMPLATE_DIR).unwrap());
        assert!(dir.is_absolute());
        assert!(dir.ends_with("custom-templates"));
    }

    #[tokio::test]
    async fn test_relative_output_is_made_absolute() {
        let generator = Arc::new(CapturingGenerator::default());
        let goal = goal(CodegenOverrides::new(), generator.clone());
        let mut host = RecordingHost::default();

        let response = goal
            .execute(
                CodegenRequest::new("go", "petstore.yaml", "target/generated-sources/swagger"),
                &mut host,
            )
            .await
            .unwrap();

        assert_eq!(host.roots.len(), 1);
        assert!(host.roots[0].is_absolute());
        assert!(host.roots[0].ends_with("target/generated-sources/swagger"));
        assert_eq!(response.output_dir, host.roots[0]);
        assert!(response.files[0].starts_with(&host.roots[0]));
    }

    #[tokio::test]
    async fn test_template_directory_beats_config_file() {
        let overrides: CodegenOverrides = [(TEMPLATE_DIR, "/from/config")].into_iter().collect();
        let generator = Arc::new(CapturingGenerator::default());
        let goal = goal(overrides, generator.clone());
        let mut request = CodegenRequest::new("java", "petstore.yaml", "/out");
        request.template_directory = Some(PathBuf::from("/from/parameter"));
        request.config_file = Some(PathBuf::from("config.json"));

        goal.execute(request, &mut RecordingHost::default())
            .await
            .unwrap();

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen[0].1.get_str(TEMPLATE_DIR), Some("/from/parameter"));
    }

    #[tokio::test]
    async fn test_unknown_generator() {
        let goal = goal(CodegenOverrides::new(), Arc::new(CapturingGenerator::default()));
        let mut host = RecordingHost::default();

        let err = goal
            .execute(CodegenRequest::new("cobol", "petstore.yaml", "/out"), &mut host)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Resolution(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: Can't resolve generator with name 'cobol'"
        );
        assert!(host.roots.is_empty());
    }

    #[tokio::test]
    async fn test_collaborator_errors_propagate_unchanged() {
        let goal = goal(CodegenOverrides::new(), Arc::new(FailingGenerator));
        let mut host = RecordingHost::default();

        let err = goal
            .execute(CodegenRequest::new("go", "petstore.yaml", "/out"), &mut host)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            GenerationError::RenderError("template exploded".to_string()).to_string()
        );
        assert!(host.roots.is_empty());

        let err = goal
            .execute(CodegenRequest::new("go", "missing.yaml", "/out"), &mut host)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Generation(GenerationError::LoadError(_))
        ));
    }

    #[tokio::test]
    async fn test_source_root_failure_is_reported() {
        let goal = goal(CodegenOverrides::new(), Arc::new(CapturingGenerator::default()));

        let err = goal
            .execute(CodegenRequest::new("go", "petstore.yaml", "/out"), &mut BrokenHost)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::SourceRoot { .. }));
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected() {
        let goal = goal(CodegenOverrides::new(), Arc::new(CapturingGenerator::default()));

        let err = goal
            .execute(CodegenRequest::new("", "petstore.yaml", "/out"), &mut RecordingHost::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Validation(_)));
    }
}
