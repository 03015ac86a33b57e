//! Multimodal embedding trait for cross-modal search.

use crate::embedding::image_embedder::ImageEmbedder;
use crate::embedding::text_embedder::TextEmbedder;

/// Embedders that place text and images in the same vector space.
///
/// Screenshots are indexed by image vector and searched by text vector, so
/// the ingestion pipeline and the ranker share one `Arc<dyn MultimodalEmbedder>`.
pub trait MultimodalEmbedder: TextEmbedder + ImageEmbedder {}

// Any type that implements both TextEmbedder and ImageEmbedder is a MultimodalEmbedder
impl<T> MultimodalEmbedder for T where T: TextEmbedder + ImageEmbedder {}
