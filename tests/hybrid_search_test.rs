use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use screenrack::document::{Document, DocumentMetadata};
use screenrack::embedding::TextEmbedder;
use screenrack::error::{Result, ScreenrackError};
use screenrack::hybrid_search::{
    Candidate, CandidateSource, HybridScorer, HybridSearchConfig, HybridSearchEngine,
    ResultMerger,
};
use screenrack::storage::{CorpusStore, MemoryCorpusStore, TextHit, VectorHit};
use screenrack::vector::Vector;

/// Embeds every query at the origin of a one-dimensional space.
#[derive(Default)]
struct OriginEmbedder {
    calls: AtomicUsize,
}

#[async_trait]
impl TextEmbedder for OriginEmbedder {
    async fn embed_text(&self, _text: &str) -> Result<Vector> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vector::new(vec![0.0]))
    }
}

/// A store whose every call fails.
struct BrokenStore;

#[async_trait]
impl CorpusStore for BrokenStore {
    async fn query(&self, _vector: &Vector, _k: usize) -> Result<Vec<VectorHit>> {
        Err(ScreenrackError::store("connection refused"))
    }

    async fn query_by_text_contains(&self, _substring: &str) -> Result<Vec<TextHit>> {
        Err(ScreenrackError::store("connection refused"))
    }

    async fn upsert(&self, _document: Document) -> Result<()> {
        Err(ScreenrackError::store("connection refused"))
    }

    async fn get(&self, _id: &str) -> Result<Option<Document>> {
        Err(ScreenrackError::store("connection refused"))
    }

    async fn ids(&self) -> Result<HashSet<String>> {
        Err(ScreenrackError::store("connection refused"))
    }

    async fn count(&self) -> Result<usize> {
        Err(ScreenrackError::store("connection refused"))
    }
}

/// A document at position `x`; its squared distance to the origin is `x * x`.
async fn put(store: &MemoryCorpusStore, id: &str, text: &str, x: f32) {
    store
        .upsert(Document::new(
            id.to_string(),
            text.to_string(),
            Vector::new(vec![x]),
            DocumentMetadata::new(format!("/shots/{id}"), id.to_string()),
        ))
        .await
        .unwrap();
}

fn engine(store: Arc<dyn CorpusStore>, embedder: Arc<dyn TextEmbedder>) -> HybridSearchEngine {
    HybridSearchEngine::new(HybridSearchConfig::default(), store, embedder).unwrap()
}

fn vector_candidate(id: &str, text: &str, score: f32) -> Candidate {
    Candidate {
        id: id.to_string(),
        text: text.to_string(),
        path: format!("/shots/{id}"),
        raw_score: score,
        matched_keyword: false,
        source: CandidateSource::Vector,
    }
}

fn keyword_candidate(id: &str, text: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        text: text.to_string(),
        path: format!("/shots/{id}"),
        raw_score: 0.5,
        matched_keyword: true,
        source: CandidateSource::Keyword,
    }
}

#[test]
fn test_union_without_duplicates() {
    let merger = ResultMerger::default();
    let results = merger.merge(
        "deploy",
        vec![
            vector_candidate("a.png", "nothing here", 0.9),
            vector_candidate("b.png", "deploy log", 0.8),
        ],
        vec![
            keyword_candidate("b.png", "deploy log"),
            keyword_candidate("c.png", "deploy failed"),
        ],
        10,
    );

    let paths: Vec<&str> = results.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(results.len(), 3);
    assert_eq!(
        paths.iter().collect::<HashSet<_>>().len(),
        3,
        "each document appears once"
    );
    // b.png: 0.8 * 1.5, a.png: 0.9, c.png: 0.5 * 1.5
    assert_eq!(paths, vec!["/shots/b.png", "/shots/a.png", "/shots/c.png"]);
}

#[test]
fn test_keyword_boost_reorders() {
    let merger = ResultMerger::default();
    let results = merger.merge(
        "invoice",
        vec![vector_candidate("photo.png", "a cat", 0.4)],
        vec![keyword_candidate("bill.png", "invoice due")],
        5,
    );

    assert_eq!(results[0].path, "/shots/bill.png");
    assert_eq!(results[0].score, 0.75);
    assert_eq!(results[1].path, "/shots/photo.png");
    assert_eq!(results[1].score, 0.4);
}

#[test]
fn test_score_cap() {
    let scorer = HybridScorer::default();
    assert_eq!(scorer.final_score(2.0, true), 2.0);
    assert_eq!(scorer.final_score(1.0, true), 1.5);
    assert_eq!(scorer.final_score(1.0, false), 1.0);
}

#[tokio::test]
async fn test_keyword_hit_outside_vector_neighborhood_surfaces() {
    let store = Arc::new(MemoryCorpusStore::new_default());
    // 20 nearby screenshots fill the vector fetch window
    for i in 0..20 {
        put(&store, &format!("near-{i:02}.png"), "desktop", 1.0 + i as f32 * 0.1).await;
    }
    put(&store, "receipt.png", "Invoice 1042", 100.0).await;

    let results = engine(store, Arc::new(OriginEmbedder::default()))
        .search("Invoice")
        .await;

    assert_eq!(results.vector_matches, 20);
    assert_eq!(results.keyword_matches, 1);
    assert_eq!(results.results[0].path, "/shots/receipt.png");
    assert_eq!(results.results[0].score, 0.75);
    // near-00 sits at distance 1.0
    assert_eq!(results.results[1].score, 0.5);
}

#[tokio::test]
async fn test_case_insensitive_reconciliation_boosts_vector_hit() {
    let store = Arc::new(MemoryCorpusStore::new_default());
    put(&store, "github.png", "Pull Request Merged", 0.0).await;
    put(&store, "slack.png", "lunch?", 0.0).await;

    let results = engine(store, Arc::new(OriginEmbedder::default()))
        .search("merged")
        .await;

    // containment in the store is case-sensitive, so only reconciliation matches
    assert_eq!(results.keyword_matches, 0);
    assert_eq!(results.results[0].path, "/shots/github.png");
    assert_eq!(results.results[0].score, 1.5);
    assert_eq!(results.results[1].score, 1.0);
}

#[tokio::test]
async fn test_top_k_truncation() {
    let store = Arc::new(MemoryCorpusStore::new_default());
    for i in 0..8 {
        put(&store, &format!("shot-{i}.png"), "", i as f32).await;
    }

    let results = engine(store, Arc::new(OriginEmbedder::default()))
        .search("anything")
        .await;

    let paths: Vec<&str> = results.results.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/shots/shot-0.png",
            "/shots/shot-1.png",
            "/shots/shot-2.png",
            "/shots/shot-3.png",
            "/shots/shot-4.png",
        ]
    );
    assert!(results.results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn test_empty_query_makes_no_calls() {
    let store = Arc::new(MemoryCorpusStore::new_default());
    put(&store, "a.png", "text", 0.0).await;
    let embedder = Arc::new(OriginEmbedder::default());

    let results = engine(store, embedder.clone()).search("").await;

    assert!(results.is_empty());
    assert!(!results.degraded);
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_repeated_queries_are_deterministic() {
    let store = Arc::new(MemoryCorpusStore::new_default());
    for i in 0..6 {
        // pairs of equal distance exercise tie ordering
        put(&store, &format!("tie-{i}.png"), "build output", (i / 2) as f32).await;
    }
    let engine = engine(store, Arc::new(OriginEmbedder::default()));

    let first = engine.search_with_limit("build", 6).await.results;
    assert_eq!(first[0].path, "/shots/tie-0.png");
    assert_eq!(first[1].path, "/shots/tie-1.png");
    for _ in 0..10 {
        assert_eq!(engine.search_with_limit("build", 6).await.results, first);
    }
}

#[tokio::test]
async fn test_total_failure_is_degraded_not_error() {
    let results = engine(Arc::new(BrokenStore), Arc::new(OriginEmbedder::default()))
        .search("error")
        .await;

    assert!(results.is_empty());
    assert!(results.vector_failed);
    assert!(results.keyword_failed);
    assert!(results.degraded);
}
