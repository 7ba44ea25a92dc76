//! Application layer error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::generation::GenerationError;
use crate::generators::RegistryError;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Configuration error: {0}")]
    Resolution(#[from] RegistryError),

    /// Collaborator failures keep their own message
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to register compile source root {}: {source}", path.display())]
    SourceRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Validation errors for requests
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
