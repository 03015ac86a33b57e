//! Types and data structures for hybrid search.

use serde::{Deserialize, Serialize};

use crate::storage::{TextHit, VectorHit};

/// Which retrieval path produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Nearest-neighbor hit.
    Vector,
    /// Text-containment hit.
    Keyword,
}

/// One retrieval hit before merging.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Document id, the merge key.
    pub id: String,
    /// OCR text of the document.
    pub text: String,
    /// Asset location.
    pub path: String,
    /// `1 / (1 + distance)` for vector hits, the keyword-only base for keyword hits.
    pub raw_score: f32,
    /// Whether the query was found in the text by the path that produced this hit.
    pub matched_keyword: bool,
    pub source: CandidateSource,
}

impl Candidate {
    /// Build a vector candidate from a store hit and its precomputed score.
    pub fn from_vector_hit(hit: VectorHit, score: f32) -> Self {
        Self {
            id: hit.id,
            text: hit.text,
            path: hit.metadata.path,
            raw_score: score,
            matched_keyword: false,
            source: CandidateSource::Vector,
        }
    }

    /// Build a keyword candidate from a store hit.
    pub fn from_text_hit(hit: TextHit, base_score: f32) -> Self {
        Self {
            id: hit.id,
            text: hit.text,
            path: hit.metadata.path,
            raw_score: base_score,
            matched_keyword: true,
            source: CandidateSource::Keyword,
        }
    }
}

/// One document's consolidated state during a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedEntry {
    pub id: String,
    pub path: String,
    pub text: String,
    /// Score before boosting: the vector score if the document was found by
    /// vector search, otherwise the keyword-only base.
    pub base_score: f32,
    pub matched_keyword: bool,
}

/// A ranked search result, the engine's output unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedResult {
    pub path: String,
    pub text: String,
    pub score: f32,
}

/// Collection of hybrid search results plus per-path bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HybridSearchResults {
    /// Results sorted by score, descending.
    pub results: Vec<MergedResult>,
    /// Candidates returned by the vector path.
    pub vector_matches: usize,
    /// Candidates returned by the keyword path.
    pub keyword_matches: usize,
    /// The vector path (embedding or query) failed or timed out.
    pub vector_failed: bool,
    /// The keyword path failed or timed out.
    pub keyword_failed: bool,
    /// Both paths failed; an empty `results` does not mean "no matches".
    pub degraded: bool,
    /// Query processing time in milliseconds.
    pub query_time_ms: u64,
    /// Query text used for search.
    pub query_text: String,
}

impl HybridSearchResults {
    /// Create new empty hybrid search results for `query_text`.
    pub fn empty(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            ..Default::default()
        }
    }

    /// Get the number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if results are empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
