//! Error types for the generation domain

use thiserror::Error;

/// Errors raised by the collaborators of a generation run: the spec loader,
/// the config-file loader and the generation engine
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Specification loading error: {0}")]
    LoadError(String),

    #[error("Invalid specification: {0}")]
    InvalidSpec(String),

    #[error("Config file error: {0}")]
    ConfigFileError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
