//! Configuration for hybrid search.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenrackError};

/// Ranking policy and retrieval limits for hybrid search.
///
/// The defaults reproduce the production ranking: 20 nearest neighbors are
/// over-fetched, keyword-only hits start at 0.5, a keyword match multiplies
/// the score by 1.5 and scores are capped at 2.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridSearchConfig {
    /// Number of nearest neighbors requested from the store.
    pub over_fetch: usize,
    /// Base score of a document found only by keyword containment.
    pub keyword_only_base: f32,
    /// Multiplier applied when the query occurs in a document's text.
    pub keyword_boost: f32,
    /// Upper bound on the final score.
    pub score_cap: f32,
    /// Number of results returned when the caller does not ask for a limit.
    pub default_top_k: usize,
    /// Deadline for each external call (embedding, vector query, keyword query).
    pub retrieval_timeout_ms: u64,
}

impl Default for HybridSearchConfig {
    fn default() -> Self {
        Self {
            over_fetch: 20,
            keyword_only_base: 0.5,
            keyword_boost: 1.5,
            score_cap: 2.0,
            default_top_k: 5,
            retrieval_timeout_ms: 10_000,
        }
    }
}

impl HybridSearchConfig {
    /// Per-call retrieval deadline.
    pub fn retrieval_timeout(&self) -> Duration {
        Duration::from_millis(self.retrieval_timeout_ms)
    }

    /// Nearest neighbors to request for a given `top_k`.
    ///
    /// Always strictly greater than `top_k` so keyword boosting can change
    /// which documents make the cut, not only their order.
    pub fn vector_fetch_size(&self, top_k: usize) -> usize {
        self.over_fetch.max(top_k.saturating_add(1))
    }

    /// Check that the policy values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.over_fetch == 0 {
            return Err(ScreenrackError::config("over_fetch must be greater than 0"));
        }
        if self.default_top_k == 0 {
            return Err(ScreenrackError::config("default_top_k must be greater than 0"));
        }
        for (name, value) in [
            ("keyword_only_base", self.keyword_only_base),
            ("keyword_boost", self.keyword_boost),
            ("score_cap", self.score_cap),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScreenrackError::config(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        if self.retrieval_timeout_ms == 0 {
            return Err(ScreenrackError::config(
                "retrieval_timeout_ms must be greater than 0",
            ));
        }
        Ok(())
    }
}
