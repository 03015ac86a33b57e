//! Request and response bodies of the query service.

use serde::{Deserialize, Serialize};

use crate::hybrid_search::{HybridSearchResults, MergedResult};

/// Body of `POST /search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    /// A missing query is treated like an empty one.
    #[serde(default)]
    pub query: String,
    /// Overrides the configured default result count.
    pub top_k: Option<usize>,
}

/// Body returned by `POST /search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<MergedResult>,
    /// Present only when both retrieval paths failed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

impl From<HybridSearchResults> for SearchResponse {
    fn from(results: HybridSearchResults) -> Self {
        Self {
            degraded: results.degraded,
            results: results.results,
        }
    }
}

/// Body returned by `POST /index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    /// Documents added by this run.
    pub count: usize,
    pub message: String,
}

impl IndexResponse {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            message: format!("Indexed {count} new images."),
        }
    }
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
