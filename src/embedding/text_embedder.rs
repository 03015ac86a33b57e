//! Text embedding trait used for query vectors.

use async_trait::async_trait;

use crate::error::Result;
use crate::vector::Vector;

/// Trait for converting text to vector embeddings.
///
/// The hybrid ranker calls this once per query. An error or an empty vector
/// makes the ranker skip its vector retrieval path for that query.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Generate an embedding vector for the given text.
    async fn embed_text(&self, text: &str) -> Result<Vector>;

    /// Get the name/identifier of this embedder.
    ///
    /// This is useful for logging and debugging purposes.
    fn name(&self) -> &str {
        "unknown"
    }
}
