//! HTTP client for an external multimodal embedding service.
//!
//! The service is expected to expose three routes:
//!
//! - `POST {base_url}/embed/text` with `{"text": "..."}`
//! - `POST {base_url}/embed/image` with `{"image": "<base64>", "filename": "...", "mime_type": "..."}`
//! - `GET {base_url}/health`
//!
//! Both embed routes answer `{"embedding": [f32, ...]}`.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::embedding::image_embedder::ImageEmbedder;
use crate::embedding::text_embedder::TextEmbedder;
use crate::error::{Result, ScreenrackError};
use crate::image::ImageData;
use crate::vector::Vector;

/// Connection settings for [`HttpEmbedder`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpEmbedderConfig {
    /// Base URL of the embedding service, without a trailing slash.
    pub base_url: String,
    /// Model name reported in logs.
    pub model: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for HttpEmbedderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8081".to_string(),
            model: "clip-ViT-B-32".to_string(),
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Serialize)]
struct TextEmbeddingRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct ImageEmbeddingRequest<'a> {
    image: String,
    filename: String,
    mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Embedder backed by a remote CLIP-style service.
///
/// # Examples
///
/// ```no_run
/// use screenrack::embedding::{HttpEmbedder, HttpEmbedderConfig, TextEmbedder};
///
/// # async fn example() -> screenrack::error::Result<()> {
/// let embedder = HttpEmbedder::new(HttpEmbedderConfig::default())?;
/// embedder.health_check().await?;
///
/// let vector = embedder.embed_text("terminal with a stack trace").await?;
/// println!("Embedding dimension: {}", vector.dimension());
/// # Ok(())
/// # }
/// ```
pub struct HttpEmbedder {
    /// HTTP client for making API requests.
    client: Client,
    config: HttpEmbedderConfig,
}

impl HttpEmbedder {
    /// Create a new embedder client.
    pub fn new(config: HttpEmbedderConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ScreenrackError::config("embedder base_url must not be empty"));
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), route)
    }

    /// Probe the service. Used at startup to fail fast when the model is unreachable.
    pub async fn health_check(&self) -> Result<()> {
        let response = self
            .client
            .get(self.url("health"))
            .send()
            .await
            .map_err(|e| {
                ScreenrackError::config(format!(
                    "embedding service at {} is unreachable: {}",
                    self.config.base_url, e
                ))
            })?;

        if !response.status().is_success() {
            return Err(ScreenrackError::config(format!(
                "embedding service health check failed with status {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn post_embedding<T: Serialize + ?Sized>(&self, route: &str, body: &T) -> Result<Vector> {
        let http_response = self
            .client
            .post(self.url(route))
            .json(body)
            .send()
            .await
            .map_err(|e| ScreenrackError::embedding(format!("embedding request failed: {}", e)))?;

        let status = http_response.status();
        let response_text = http_response.text().await.map_err(|e| {
            ScreenrackError::embedding(format!("failed to read response text: {}", e))
        })?;

        if !status.is_success() {
            return Err(ScreenrackError::embedding(format!(
                "embedding service error (status {}): {}",
                status, response_text
            )));
        }

        let response: EmbeddingResponse = serde_json::from_str(&response_text).map_err(|e| {
            ScreenrackError::embedding(format!("failed to parse embedding response: {}", e))
        })?;

        let vector = Vector::new(response.embedding);
        vector.validate()?;
        Ok(vector)
    }
}

#[async_trait]
impl TextEmbedder for HttpEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vector> {
        self.post_embedding("embed/text", &TextEmbeddingRequest { text })
            .await
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl ImageEmbedder for HttpEmbedder {
    async fn embed_image(&self, image: &ImageData) -> Result<Vector> {
        let request = ImageEmbeddingRequest {
            image: STANDARD.encode(&image.bytes),
            filename: image.filename(),
            mime_type: image.mime_type(),
        };
        self.post_embedding("embed/image", &request).await
    }
}
