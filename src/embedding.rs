//! Embedding support for screenshot search.
//!
//! Screenrack does not run an embedding model in-process. Instead it talks to
//! embedders through two traits:
//!
//! - [`TextEmbedder`] turns a query string into a vector
//! - [`ImageEmbedder`] turns a loaded screenshot into a vector
//!
//! Types implementing both are [`MultimodalEmbedder`]s, which is what the
//! ingestion pipeline and the hybrid ranker need: image vectors written at
//! index time and text vectors computed at query time must live in the same
//! space (e.g. CLIP).
//!
//! [`HttpEmbedder`] is the shipped implementation; it calls an external
//! embedding service over HTTP.
//!
//! # Custom Implementation
//!
//! ```
//! use async_trait::async_trait;
//! use screenrack::embedding::{ImageEmbedder, TextEmbedder};
//! use screenrack::error::Result;
//! use screenrack::image::ImageData;
//! use screenrack::vector::Vector;
//!
//! struct FixedEmbedder;
//!
//! #[async_trait]
//! impl TextEmbedder for FixedEmbedder {
//!     async fn embed_text(&self, _text: &str) -> Result<Vector> {
//!         Ok(Vector::new(vec![1.0, 0.0]))
//!     }
//! }
//!
//! #[async_trait]
//! impl ImageEmbedder for FixedEmbedder {
//!     async fn embed_image(&self, _image: &ImageData) -> Result<Vector> {
//!         Ok(Vector::new(vec![0.0, 1.0]))
//!     }
//! }
//! ```

pub mod http_embedder;
pub mod image_embedder;
pub mod multimodal_embedder;
pub mod text_embedder;

pub use http_embedder::{HttpEmbedder, HttpEmbedderConfig};
pub use image_embedder::ImageEmbedder;
pub use multimodal_embedder::MultimodalEmbedder;
pub use text_embedder::TextEmbedder;
