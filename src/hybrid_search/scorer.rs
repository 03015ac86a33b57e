//! Score computation for hybrid search.

use super::config::HybridSearchConfig;

/// Convert a nearest-neighbor distance into a score in `(0, 1]`.
///
/// Negative distances are treated as 0 and NaN as infinitely far.
pub fn vector_score(distance: f32) -> f32 {
    let distance = if distance.is_nan() {
        f32::INFINITY
    } else {
        distance.max(0.0)
    };
    1.0 / (1.0 + distance)
}

/// Case-insensitive substring test used to confirm keyword matches.
pub fn contains_ignore_case(text: &str, query: &str) -> bool {
    text.to_lowercase().contains(&query.to_lowercase())
}

/// Applies the keyword boost and the score cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridScorer {
    keyword_only_base: f32,
    keyword_boost: f32,
    score_cap: f32,
}

impl HybridScorer {
    pub fn new(config: &HybridSearchConfig) -> Self {
        Self {
            keyword_only_base: config.keyword_only_base,
            keyword_boost: config.keyword_boost,
            score_cap: config.score_cap,
        }
    }

    /// Base score for documents found only by keyword search.
    pub fn keyword_only_base(&self) -> f32 {
        self.keyword_only_base
    }

    /// `min(base * boost_if_matched, cap)`.
    pub fn final_score(&self, base_score: f32, matched_keyword: bool) -> f32 {
        let score = if matched_keyword {
            base_score * self.keyword_boost
        } else {
            base_score
        };
        score.min(self.score_cap)
    }
}

impl Default for HybridScorer {
    fn default() -> Self {
        Self::new(&HybridSearchConfig::default())
    }
}
