//! Candidate retrieval adapters over the corpus store.
//!
//! Each function produces one candidate list or an error. The engine decides
//! what a failure means; nothing here logs or swallows errors.

use std::time::Duration;

use super::scorer::vector_score;
use super::types::Candidate;
use crate::embedding::TextEmbedder;
use crate::error::{Result, ScreenrackError};
use crate::storage::CorpusStore;
use crate::util::with_timeout;

/// Embed `query` and fetch its `k` nearest documents.
pub async fn vector_candidates(
    store: &dyn CorpusStore,
    embedder: &dyn TextEmbedder,
    query: &str,
    k: usize,
    timeout: Duration,
) -> Result<Vec<Candidate>> {
    let query_vector = with_timeout("query embedding", timeout, embedder.embed_text(query)).await?;
    if query_vector.is_empty() {
        return Err(ScreenrackError::embedding(format!(
            "{} returned an empty query embedding",
            embedder.name()
        )));
    }

    let hits = with_timeout("vector query", timeout, store.query(&query_vector, k)).await?;
    Ok(hits
        .into_iter()
        .map(|hit| {
            let score = vector_score(hit.distance);
            Candidate::from_vector_hit(hit, score)
        })
        .collect())
}

/// Fetch documents whose text contains `query`.
pub async fn keyword_candidates(
    store: &dyn CorpusStore,
    query: &str,
    base_score: f32,
    timeout: Duration,
) -> Result<Vec<Candidate>> {
    let hits = with_timeout(
        "keyword query",
        timeout,
        store.query_by_text_contains(query),
    )
    .await?;
    Ok(hits
        .into_iter()
        .map(|hit| Candidate::from_text_hit(hit, base_score))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use async_trait::async_trait;

    use super::*;
    use crate::document::{Document, DocumentMetadata};
    use crate::storage::{MemoryCorpusStore, TextHit, VectorHit};
    use crate::vector::Vector;

    struct EmptyEmbedder;

    #[async_trait]
    impl TextEmbedder for EmptyEmbedder {
        async fn embed_text(&self, _text: &str) -> Result<Vector> {
            Ok(Vector::new(Vec::new()))
        }
    }

    struct UnitEmbedder;

    #[async_trait]
    impl TextEmbedder for UnitEmbedder {
        async fn embed_text(&self, _text: &str) -> Result<Vector> {
            Ok(Vector::new(vec![1.0]))
        }
    }

    /// Store that reports a distance of -0.5 for every document.
    struct NegativeDistanceStore;

    #[async_trait]
    impl CorpusStore for NegativeDistanceStore {
        async fn query(&self, _vector: &Vector, _k: usize) -> Result<Vec<VectorHit>> {
            Ok(vec![VectorHit {
                id: "a.png".to_string(),
                distance: -0.5,
                metadata: DocumentMetadata::new("/shots/a.png", "a.png"),
                text: String::new(),
            }])
        }

        async fn query_by_text_contains(&self, _substring: &str) -> Result<Vec<TextHit>> {
            Ok(Vec::new())
        }

        async fn upsert(&self, _document: Document) -> Result<()> {
            Ok(())
        }

        async fn get(&self, _id: &str) -> Result<Option<Document>> {
            Ok(None)
        }

        async fn ids(&self) -> Result<HashSet<String>> {
            Ok(HashSet::new())
        }

        async fn count(&self) -> Result<usize> {
            Ok(1)
        }
    }

    #[tokio::test]
    async fn test_empty_query_embedding_fails_vector_path() {
        let store = MemoryCorpusStore::new_default();
        let err = vector_candidates(&store, &EmptyEmbedder, "q", 20, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ScreenrackError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_vector_scores_stay_in_unit_interval() {
        let candidates = vector_candidates(
            &NegativeDistanceStore,
            &UnitEmbedder,
            "q",
            20,
            Duration::from_secs(1),
        )
        .await
        .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].raw_score, 1.0);
        assert!(!candidates[0].matched_keyword);
    }

    #[tokio::test]
    async fn test_keyword_candidates_are_marked_matched() {
        let store = MemoryCorpusStore::new_default();
        store
            .upsert(Document::new(
                "a.png",
                "Quarterly report",
                Vector::new(vec![1.0]),
                DocumentMetadata::new("/shots/a.png", "a.png"),
            ))
            .await
            .unwrap();

        let candidates = keyword_candidates(&store, "report", 0.5, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].matched_keyword);
        assert_eq!(candidates[0].raw_score, 0.5);
        assert_eq!(candidates[0].path, "/shots/a.png");
    }
}
