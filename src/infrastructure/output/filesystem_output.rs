//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::trace;

use crate::generation::{Artifact, GenerationError, OutputService};

/// Output service that writes artifacts to the filesystem
#[derive(Debug, Default)]
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), GenerationError> {
        for artifact in artifacts {
            if let Some(parent) = artifact.path.parent() {
                self.ensure_directory(parent).await?;
            }

            let mut file = fs::File::create(&artifact.path).await.map_err(|e| {
                GenerationError::OutputError(format!(
                    "Failed to create file {}: {}",
                    artifact.path.display(),
                    e
                ))
            })?;

            file.write_all(artifact.content.as_bytes())
                .await
                .map_err(|e| {
                    GenerationError::OutputError(format!(
                        "Failed to write file {}: {}",
                        artifact.path.display(),
                        e
                    ))
                })?;

            file.flush().await.map_err(|e| {
                GenerationError::OutputError(format!(
                    "Failed to flush file {}: {}",
                    artifact.path.display(),
                    e
                ))
            })?;

            trace!(path = %artifact.path.display(), bytes = artifact.content.len(), "Wrote file");
        }

        Ok(())
    }

    async fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError> {
        fs::create_dir_all(path).await.map_err(|e| {
            GenerationError::OutputError(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })
    }
}
