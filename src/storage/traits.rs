//! Corpus store abstraction and the hit types it returns.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::document::{Document, DocumentMetadata};
use crate::error::Result;
use crate::vector::Vector;

/// A nearest-neighbor hit.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorHit {
    pub id: String,
    /// Non-negative dissimilarity; lower is closer.
    pub distance: f32,
    pub metadata: DocumentMetadata,
    pub text: String,
}

/// A text-containment hit.
#[derive(Debug, Clone, PartialEq)]
pub struct TextHit {
    pub id: String,
    pub metadata: DocumentMetadata,
    pub text: String,
}

/// A store of screenshot documents.
///
/// Reads (`query`, `query_by_text_contains`, `get`, `ids`, `count`) may run
/// concurrently. Callers are responsible for serializing ingestion runs: the
/// "skip if id exists" check and `upsert` are not atomic with each other.
#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Return up to `k` documents ordered by ascending distance to `vector`.
    async fn query(&self, vector: &Vector, k: usize) -> Result<Vec<VectorHit>>;

    /// Return documents whose text contains `substring`.
    ///
    /// Case sensitivity is backend-defined; the bundled store is case-sensitive.
    async fn query_by_text_contains(&self, substring: &str) -> Result<Vec<TextHit>>;

    /// Insert a document, replacing any document with the same id.
    async fn upsert(&self, document: Document) -> Result<()>;

    /// Look up a document by id.
    async fn get(&self, id: &str) -> Result<Option<Document>>;

    /// All ids currently stored.
    async fn ids(&self) -> Result<HashSet<String>>;

    /// Number of stored documents.
    async fn count(&self) -> Result<usize>;

    /// Persist pending writes, if the backend buffers them.
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}
