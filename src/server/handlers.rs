//! HTTP request handlers and shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use log::{error, info};
use tokio::sync::Mutex;

use crate::hybrid_search::HybridSearchEngine;
use crate::ingest::IngestionPipeline;
use crate::server::errors::ApiError;
use crate::server::models::*;

/// Shared application state passed to every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<HybridSearchEngine>,
    pub pipeline: Arc<IngestionPipeline>,
    /// Directory indexed by `POST /index` and served under `/screenshots`.
    pub screenshots_dir: PathBuf,
    /// Serializes ingestion runs.
    pub ingest_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        engine: Arc<HybridSearchEngine>,
        pipeline: Arc<IngestionPipeline>,
        screenshots_dir: PathBuf,
    ) -> Self {
        Self {
            engine,
            pipeline,
            screenshots_dir,
            ingest_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `POST /index`: index new screenshots from the configured directory.
pub async fn index(State(state): State<AppState>) -> Result<Json<IndexResponse>, ApiError> {
    let _guard = state.ingest_lock.lock().await;
    let report = state
        .pipeline
        .ingest(&state.screenshots_dir)
        .await
        .map_err(|e| {
            error!("Indexing {} failed: {}", state.screenshots_dir.display(), e);
            ApiError::Internal(e.to_string())
        })?;
    Ok(Json(IndexResponse::new(report.added)))
}

/// `POST /search`: hybrid search over the indexed screenshots.
///
/// An empty query returns no results without touching the store.
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Json<SearchResponse> {
    if req.query.is_empty() {
        return Json(SearchResponse::default());
    }

    let top_k = req
        .top_k
        .unwrap_or(state.engine.config().default_top_k);
    let results = state.engine.search_with_limit(&req.query, top_k).await;
    info!(
        "Search {:?} returned {} results{}",
        req.query,
        results.len(),
        if results.degraded { " (degraded)" } else { "" }
    );
    Json(results.into())
}
