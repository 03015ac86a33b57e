//! Hybrid search combining semantic (vector) and keyword retrieval.
//!
//! A query runs two independent retrieval paths over the corpus store:
//! - nearest neighbors of the query's text embedding
//! - documents whose OCR text contains the query
//!
//! The candidate lists are merged by document id, boosted when the query
//! occurs in the document text (case-insensitively), capped, and ranked.

pub mod config;
pub mod engine;
pub mod merger;
pub mod retrieval;
pub mod scorer;
pub mod types;

pub use config::HybridSearchConfig;
pub use engine::HybridSearchEngine;
pub use merger::ResultMerger;
pub use scorer::HybridScorer;
pub use types::{Candidate, CandidateSource, HybridSearchResults, MergedEntry, MergedResult};
