//! File-based specification loader
//!
//! This loader handles only file I/O. Decoding is done by [`parse_spec`].

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::parser::{DocumentFormat, parse_spec};
use crate::generation::{ApiSpec, GenerationError, SpecLoader};

/// Loads specifications from local files
#[derive(Debug, Default)]
pub struct FileSpecLoader;

impl FileSpecLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SpecLoader for FileSpecLoader {
    async fn load(&self, source: &str) -> Result<ApiSpec, GenerationError> {
        let content = fs::read_to_string(source).await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to read specification {source}: {e}"))
        })?;
        debug!(source, bytes = content.len(), "Read specification file");

        parse_spec(&content, DocumentFormat::from_location(source))
    }
}
