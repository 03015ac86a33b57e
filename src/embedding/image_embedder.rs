//! Image embedding trait used at ingestion time.

use async_trait::async_trait;

use crate::error::Result;
use crate::image::ImageData;
use crate::vector::Vector;

/// Trait for converting screenshots to vector embeddings.
#[async_trait]
pub trait ImageEmbedder: Send + Sync {
    /// Generate an embedding vector for the given image.
    async fn embed_image(&self, image: &ImageData) -> Result<Vector>;
}
