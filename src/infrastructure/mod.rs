//! Infrastructure layer - concrete implementations of domain ports

pub mod build;
pub mod config;
pub mod generation;
pub mod openapi;
pub mod output;

use std::sync::Arc;

use crate::application::CodeGenGoal;
use crate::generation::GenerationError;
use crate::generators::GeneratorRegistry;

/// A goal wired with the built-in generators and the filesystem/HTTP adapters
pub fn default_codegen_goal() -> Result<CodeGenGoal, GenerationError> {
    Ok(CodeGenGoal::new(
        Arc::new(GeneratorRegistry::with_defaults()),
        Arc::new(openapi::CompositeSpecLoader::new()?),
        Arc::new(config::FileConfigLoader::new()),
        Arc::new(generation::DefaultGenerator::default()),
    ))
}
