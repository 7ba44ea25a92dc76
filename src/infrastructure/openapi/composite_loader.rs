//! Loader that dispatches on the kind of location

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::{FileSpecLoader, HttpSpecLoader};
use crate::generation::{ApiSpec, GenerationError, SpecLoader};

/// Loads from HTTP(S) URLs or local files, depending on the location
#[derive(Debug)]
pub struct CompositeSpecLoader {
    http: HttpSpecLoader,
    file: FileSpecLoader,
}

impl CompositeSpecLoader {
    pub fn new() -> Result<Self, GenerationError> {
        Ok(Self {
            http: HttpSpecLoader::new()?,
            file: FileSpecLoader::new(),
        })
    }

    /// Whether `source` is an HTTP(S) URL rather than a file path
    pub fn is_remote(source: &str) -> bool {
        Url::parse(source)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }
}

#[async_trait]
impl SpecLoader for CompositeSpecLoader {
    async fn load(&self, source: &str) -> Result<ApiSpec, GenerationError> {
        if Self::is_remote(source) {
            debug!(source, "Loading specification over HTTP");
            self.http.load(source).await
        } else {
            debug!(source, "Loading specification from file");
            self.file.load(source).await
        }
    }
}
