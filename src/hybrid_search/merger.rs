//! Result merging functionality for hybrid search.
//!
//! Merging is pure: it takes the two fully materialized candidate lists and
//! produces the ranked output without touching the store or the embedder.

use std::collections::HashMap;

use super::config::HybridSearchConfig;
use super::scorer::{HybridScorer, contains_ignore_case};
use super::types::{Candidate, MergedEntry, MergedResult};

/// Result merger for combining keyword and vector search results.
#[derive(Debug, Clone)]
pub struct ResultMerger {
    scorer: HybridScorer,
}

impl ResultMerger {
    /// Create a new result merger.
    pub fn new(config: &HybridSearchConfig) -> Self {
        Self {
            scorer: HybridScorer::new(config),
        }
    }

    pub fn scorer(&self) -> &HybridScorer {
        &self.scorer
    }

    /// Union both candidate lists by document id.
    ///
    /// Vector candidates are applied first. A keyword candidate whose id is
    /// already present only sets `matched_keyword`; a new id enters with the
    /// keyword-only base score. Every entry is then re-checked for a
    /// case-insensitive occurrence of `query` in its text. Entries keep
    /// arrival order: vector hits by distance, then keyword-only hits.
    pub fn reconcile(
        &self,
        query: &str,
        vector_candidates: Vec<Candidate>,
        keyword_candidates: Vec<Candidate>,
    ) -> Vec<MergedEntry> {
        let mut entries: Vec<MergedEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for candidate in vector_candidates {
            if positions.contains_key(&candidate.id) {
                continue;
            }
            positions.insert(candidate.id.clone(), entries.len());
            entries.push(MergedEntry {
                id: candidate.id,
                path: candidate.path,
                text: candidate.text,
                base_score: candidate.raw_score,
                matched_keyword: candidate.matched_keyword,
            });
        }

        for candidate in keyword_candidates {
            match positions.get(&candidate.id) {
                Some(&pos) => entries[pos].matched_keyword = true,
                None => {
                    positions.insert(candidate.id.clone(), entries.len());
                    entries.push(MergedEntry {
                        id: candidate.id,
                        path: candidate.path,
                        text: candidate.text,
                        base_score: self.scorer.keyword_only_base(),
                        matched_keyword: true,
                    });
                }
            }
        }

        for entry in &mut entries {
            if !entry.matched_keyword && contains_ignore_case(&entry.text, query) {
                entry.matched_keyword = true;
            }
        }

        entries
    }

    /// Score, sort (stable, descending) and truncate to `top_k`.
    pub fn rank(&self, entries: Vec<MergedEntry>, top_k: usize) -> Vec<MergedResult> {
        let mut results: Vec<MergedResult> = entries
            .into_iter()
            .map(|entry| MergedResult {
                score: self
                    .scorer
                    .final_score(entry.base_score, entry.matched_keyword),
                path: entry.path,
                text: entry.text,
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);
        results
    }

    /// Reconcile and rank in one step.
    pub fn merge(
        &self,
        query: &str,
        vector_candidates: Vec<Candidate>,
        keyword_candidates: Vec<Candidate>,
        top_k: usize,
    ) -> Vec<MergedResult> {
        let entries = self.reconcile(query, vector_candidates, keyword_candidates);
        self.rank(entries, top_k)
    }
}

impl Default for ResultMerger {
    fn default() -> Self {
        Self::new(&HybridSearchConfig::default())
    }
}
