//! Hybrid search engine implementation.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info};

use super::config::HybridSearchConfig;
use super::merger::ResultMerger;
use super::retrieval::{keyword_candidates, vector_candidates};
use super::types::HybridSearchResults;
use crate::embedding::TextEmbedder;
use crate::error::Result;
use crate::storage::CorpusStore;

/// Hybrid search engine that combines vector and keyword retrieval.
///
/// The engine only reads from the store. Concurrent searches need no
/// coordination beyond what the store itself provides.
pub struct HybridSearchEngine {
    /// Configuration for hybrid search.
    config: HybridSearchConfig,
    /// Corpus the two retrieval paths read from.
    store: Arc<dyn CorpusStore>,
    /// Text embedder for converting queries to vectors.
    embedder: Arc<dyn TextEmbedder>,
    /// Result merger for combining search results.
    merger: ResultMerger,
}

impl HybridSearchEngine {
    /// Create a new hybrid search engine.
    pub fn new(
        config: HybridSearchConfig,
        store: Arc<dyn CorpusStore>,
        embedder: Arc<dyn TextEmbedder>,
    ) -> Result<Self> {
        config.validate()?;
        let merger = ResultMerger::new(&config);

        Ok(Self {
            config,
            store,
            embedder,
            merger,
        })
    }

    pub fn config(&self) -> &HybridSearchConfig {
        &self.config
    }

    /// Search with the configured default result count.
    pub async fn search(&self, query: &str) -> HybridSearchResults {
        self.search_with_limit(query, self.config.default_top_k)
            .await
    }

    /// Perform hybrid search returning at most `top_k` results.
    ///
    /// Never fails: a failing retrieval path contributes no candidates, and
    /// when both fail the result is empty with `degraded` set.
    pub async fn search_with_limit(&self, query: &str, top_k: usize) -> HybridSearchResults {
        if query.is_empty() || top_k == 0 {
            return HybridSearchResults::empty(query);
        }

        let start_time = Instant::now();
        let timeout = self.config.retrieval_timeout();

        let (vector_result, keyword_result) = tokio::join!(
            vector_candidates(
                self.store.as_ref(),
                self.embedder.as_ref(),
                query,
                self.config.vector_fetch_size(top_k),
                timeout,
            ),
            keyword_candidates(
                self.store.as_ref(),
                query,
                self.merger.scorer().keyword_only_base(),
                timeout,
            ),
        );

        let (vector_hits, vector_failed) = match vector_result {
            Ok(hits) => (hits, false),
            Err(e) => {
                error!("Vector search failed: {}", e);
                (Vec::new(), true)
            }
        };
        let (keyword_hits, keyword_failed) = match keyword_result {
            Ok(hits) => (hits, false),
            Err(e) => {
                error!("Keyword search failed: {}", e);
                (Vec::new(), true)
            }
        };

        let vector_matches = vector_hits.len();
        let keyword_matches = keyword_hits.len();
        debug!(
            "Query {:?}: {} vector candidates, {} keyword candidates",
            query, vector_matches, keyword_matches
        );

        let results = self.merger.merge(query, vector_hits, keyword_hits, top_k);
        let degraded = vector_failed && keyword_failed;
        if degraded {
            error!("Both retrieval paths failed for query {:?}", query);
        }

        let query_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Found {} results for {:?} in {}ms",
            results.len(),
            query,
            query_time_ms
        );

        HybridSearchResults {
            results,
            vector_matches,
            keyword_matches,
            vector_failed,
            keyword_failed,
            degraded,
            query_time_ms,
            query_text: query.to_string(),
        }
    }
}
