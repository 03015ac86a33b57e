//! Wiring of store, embedder, OCR, ingestion and search into one service.

use std::sync::Arc;

use axum::Router;
use log::info;

use crate::config::ScreenrackConfig;
use crate::embedding::{HttpEmbedder, MultimodalEmbedder};
use crate::error::Result;
use crate::hybrid_search::HybridSearchEngine;
use crate::ingest::IngestionPipeline;
use crate::ocr::{OcrEngine, TesseractOcr};
use crate::server::{AppState, create_router};
use crate::storage::{CorpusStore, MemoryCorpusStore};

/// The assembled application.
///
/// One embedder serves both sides: image vectors at ingestion time and
/// query vectors at search time.
pub struct ScreenrackService {
    config: ScreenrackConfig,
    store: Arc<dyn CorpusStore>,
    engine: Arc<HybridSearchEngine>,
    pipeline: Arc<IngestionPipeline>,
}

impl ScreenrackService {
    /// Assemble a service from already constructed collaborators.
    pub fn new<E>(
        config: ScreenrackConfig,
        store: Arc<dyn CorpusStore>,
        embedder: Arc<E>,
        ocr: Arc<dyn OcrEngine>,
    ) -> Result<Self>
    where
        E: MultimodalEmbedder + 'static,
    {
        config.validate()?;
        let engine = HybridSearchEngine::new(config.search.clone(), store.clone(), embedder.clone())?;
        let pipeline = IngestionPipeline::new(store.clone(), embedder, ocr, config.ingest.clone());

        Ok(Self {
            config,
            store,
            engine: Arc::new(engine),
            pipeline: Arc::new(pipeline),
        })
    }

    /// Open the configured snapshot store and connect to the HTTP embedder
    /// and tesseract.
    ///
    /// With `probe_embedder` set, an unreachable embedding service is an
    /// error instead of surfacing later as failed searches.
    pub async fn connect(config: ScreenrackConfig, probe_embedder: bool) -> Result<Self> {
        config.validate()?;
        let store = MemoryCorpusStore::open(config.store_config()).await?;
        info!(
            "Opened store {} with {} documents",
            config.paths.store_path.display(),
            store.count().await?
        );

        let embedder = HttpEmbedder::new(config.embedder.clone())?;
        if probe_embedder {
            embedder.health_check().await?;
            info!("Embedding service at {} is up", config.embedder.base_url);
        }
        let ocr = TesseractOcr::new(config.ocr.clone());

        Self::new(config, Arc::new(store), Arc::new(embedder), Arc::new(ocr))
    }

    pub fn config(&self) -> &ScreenrackConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn CorpusStore> {
        &self.store
    }

    pub fn engine(&self) -> &Arc<HybridSearchEngine> {
        &self.engine
    }

    pub fn pipeline(&self) -> &Arc<IngestionPipeline> {
        &self.pipeline
    }

    /// State shared by the HTTP handlers.
    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.engine.clone(),
            self.pipeline.clone(),
            self.config.paths.screenshots_dir.clone(),
        )
    }

    /// The HTTP router for this service.
    pub fn router(&self) -> Result<Router> {
        create_router(self.app_state(), self.config.server.cors_origin.as_deref())
    }
}
