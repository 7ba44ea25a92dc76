//! HTTP-based specification loader

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::parser::{DocumentFormat, parse_spec};
use crate::generation::{ApiSpec, GenerationError, SpecLoader};

/// Loads specifications from HTTP/HTTPS URLs
#[derive(Debug, Clone)]
pub struct HttpSpecLoader {
    client: Client,
}

impl HttpSpecLoader {
    pub fn new() -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| GenerationError::LoadError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SpecLoader for HttpSpecLoader {
    async fn load(&self, source: &str) -> Result<ApiSpec, GenerationError> {
        if !source.starts_with("http://") && !source.starts_with("https://") {
            return Err(GenerationError::LoadError(format!(
                "HttpSpecLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        let response = self.client.get(source).send().await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to fetch specification from {source}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::LoadError(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let content = response.text().await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to read response body: {e}"))
        })?;
        debug!(source, content_type = %content_type, bytes = content.len(), "Fetched specification");

        let format = DocumentFormat::from_content_type(&content_type)
            .unwrap_or_else(|| DocumentFormat::from_location(source));
        parse_spec(&content, format)
    }
}
