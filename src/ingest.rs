//! Screenshot ingestion.
//!
//! [`IngestionPipeline::ingest`] scans a directory for supported images and
//! adds every file whose id is not yet in the store. The id of a screenshot
//! is its file name, so re-running over an unchanged directory writes nothing.
//!
//! Per-file problems never abort a batch:
//! - OCR failure indexes the image with empty text
//! - embedding failure (or an empty vector) skips the file
//! - load and upsert failures skip the file

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentMetadata};
use crate::embedding::ImageEmbedder;
use crate::error::Result;
use crate::image::{ImageData, is_supported_image};
use crate::ocr::OcrEngine;
use crate::storage::CorpusStore;
use crate::util::with_timeout;

/// Settings for [`IngestionPipeline`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Deadline for each OCR and embedding call.
    pub extraction_timeout_ms: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            extraction_timeout_ms: 60_000,
        }
    }
}

impl IngestConfig {
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_millis(self.extraction_timeout_ms)
    }
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Documents written to the store.
    pub added: usize,
    /// Supported files whose id was already indexed.
    pub skipped_existing: usize,
    /// Supported files that could not be indexed.
    pub failed: usize,
    /// Supported files found in the directory.
    pub scanned: usize,
}

/// Turns screenshot files into corpus documents.
pub struct IngestionPipeline {
    store: Arc<dyn CorpusStore>,
    embedder: Arc<dyn ImageEmbedder>,
    ocr: Arc<dyn OcrEngine>,
    config: IngestConfig,
}

impl IngestionPipeline {
    pub fn new(
        store: Arc<dyn CorpusStore>,
        embedder: Arc<dyn ImageEmbedder>,
        ocr: Arc<dyn OcrEngine>,
        config: IngestConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            ocr,
            config,
        }
    }

    /// The store this pipeline writes to.
    pub fn store(&self) -> &Arc<dyn CorpusStore> {
        &self.store
    }

    /// Index every new supported image in `source_dir`.
    ///
    /// Only failures to access or list the directory, read the existing ids
    /// or flush the store are returned as errors. A missing directory yields
    /// an empty report.
    pub async fn ingest(&self, source_dir: &Path) -> Result<IngestReport> {
        let start_time = Instant::now();
        let mut report = IngestReport::default();

        match tokio::fs::metadata(source_dir).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Screenshot directory {} does not exist, nothing to index",
                    source_dir.display()
                );
                return Ok(report);
            }
            Err(e) => return Err(e.into()),
        }

        let existing = self.store.ids().await?;
        let files = list_images(source_dir).await?;
        report.scanned = files.len();

        for path in files {
            let Some(id) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if existing.contains(&id) {
                debug!("Skipping {id}, already indexed");
                report.skipped_existing += 1;
                continue;
            }

            info!("Processing {id}...");
            match self.index_file(&id, &path).await {
                Ok(()) => {
                    info!("Indexed {id}");
                    report.added += 1;
                }
                Err(e) => {
                    warn!("Skipping {id}: {e}");
                    report.failed += 1;
                }
            }
        }

        // also persists documents a previous run added but failed to flush
        self.store.flush().await?;

        info!(
            "Indexed {} new images ({} already indexed, {} failed) in {}ms",
            report.added,
            report.skipped_existing,
            report.failed,
            start_time.elapsed().as_millis()
        );
        Ok(report)
    }

    async fn index_file(&self, id: &str, path: &Path) -> Result<()> {
        let image = ImageData::load(path).await?;
        let timeout = self.config.extraction_timeout();

        let text = match with_timeout("ocr", timeout, self.ocr.recognize(&image)).await {
            Ok(text) => text,
            Err(e) => {
                warn!("OCR failed for {id} using {}: {e}", self.ocr.name());
                String::new()
            }
        };

        let vector = with_timeout("image embedding", timeout, self.embedder.embed_image(&image))
            .await?;
        vector.validate()?;

        let metadata = DocumentMetadata::from_path(path).with_indexed_at(Utc::now());
        self.store
            .upsert(Document::new(id.to_string(), text, vector, metadata))
            .await
    }
}

/// Supported images directly inside `dir`, sorted by path.
async fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if is_supported_image(&path) && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::error::ScreenrackError;
    use crate::storage::{MemoryCorpusStore, MemoryStoreConfig};
    use crate::vector::Vector;

    /// Embeds an image as `[byte count]` and counts calls.
    #[derive(Default)]
    struct ByteCountEmbedder {
        calls: AtomicUsize,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl ImageEmbedder for ByteCountEmbedder {
        async fn embed_image(&self, image: &ImageData) -> Result<Vector> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on.is_some_and(|name| name == image.filename()) {
                return Err(ScreenrackError::embedding("model crashed"));
            }
            Ok(Vector::new(vec![image.bytes.len() as f32]))
        }
    }

    /// Returns the file contents as text unless told to fail.
    struct EchoOcr {
        fail: bool,
    }

    #[async_trait]
    impl OcrEngine for EchoOcr {
        async fn recognize(&self, image: &ImageData) -> Result<String> {
            if self.fail {
                return Err(ScreenrackError::ocr("tesseract missing"));
            }
            Ok(String::from_utf8_lossy(&image.bytes).into_owned())
        }
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.png"), b"second shot").unwrap();
        std::fs::write(dir.path().join("a.JPG"), b"first shot").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();
        dir
    }

    fn pipeline(
        store: Arc<MemoryCorpusStore>,
        embedder: Arc<ByteCountEmbedder>,
        ocr_fails: bool,
    ) -> IngestionPipeline {
        IngestionPipeline::new(
            store,
            embedder,
            Arc::new(EchoOcr { fail: ocr_fails }),
            IngestConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_ingest_is_idempotent() {
        let dir = fixture();
        let store = Arc::new(MemoryCorpusStore::new_default());
        let embedder = Arc::new(ByteCountEmbedder::default());
        let pipeline = pipeline(store.clone(), embedder.clone(), false);

        let first = pipeline.ingest(dir.path()).await.unwrap();
        assert_eq!(first.added, 2);
        assert_eq!(first.scanned, 2);

        let doc = store.get("a.JPG").await.unwrap().unwrap();
        assert_eq!(doc.text, "first shot");
        assert_eq!(doc.metadata.filename, "a.JPG");
        assert!(doc.metadata.path.ends_with("a.JPG"));
        assert!(doc.metadata.indexed_at.is_some());

        let second = pipeline.ingest(dir.path()).await.unwrap();
        assert_eq!(second.added, 0);
        assert_eq!(second.skipped_existing, 2);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ocr_failure_indexes_with_empty_text() {
        let dir = fixture();
        let store = Arc::new(MemoryCorpusStore::new_default());
        let pipeline = pipeline(store.clone(), Arc::new(ByteCountEmbedder::default()), true);

        let report = pipeline.ingest(dir.path()).await.unwrap();
        assert_eq!(report.added, 2);
        assert_eq!(store.get("b.png").await.unwrap().unwrap().text, "");
    }

    #[tokio::test]
    async fn test_embedding_failure_skips_file() {
        let dir = fixture();
        let store = Arc::new(MemoryCorpusStore::new_default());
        let embedder = Arc::new(ByteCountEmbedder {
            fail_on: Some("b.png"),
            ..Default::default()
        });
        let pipeline = pipeline(store.clone(), embedder, false);

        let report = pipeline.ingest(dir.path()).await.unwrap();
        assert_eq!(report.added, 1);
        assert_eq!(report.failed, 1);
        assert!(store.get("b.png").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_directory_adds_nothing() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(MemoryCorpusStore::new_default());
        let pipeline = pipeline(store.clone(), Arc::new(ByteCountEmbedder::default()), false);

        let report = pipeline.ingest(&dir.path().join("missing")).await.unwrap();
        assert_eq!(report, IngestReport::default());
    }

    #[tokio::test]
    async fn test_empty_file_counts_as_failure() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("blank.png"), b"").unwrap();
        let store = Arc::new(MemoryCorpusStore::new_default());
        let pipeline = pipeline(store.clone(), Arc::new(ByteCountEmbedder::default()), false);

        let report = pipeline.ingest(dir.path()).await.unwrap();
        assert_eq!(report.failed, 1);
        assert_eq!(report.added, 0);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_counts_as_failure() {
        let dir = fixture();
        let store = Arc::new(MemoryCorpusStore::new_default());
        store
            .upsert(Document::new(
                "old.png",
                "",
                Vector::new(vec![0.0, 0.0]),
                DocumentMetadata::new("/shots/old.png", "old.png"),
            ))
            .await
            .unwrap();
        let pipeline = pipeline(store.clone(), Arc::new(ByteCountEmbedder::default()), false);

        let report = pipeline.ingest(dir.path()).await.unwrap();
        assert_eq!(report.failed, 2);
        assert_eq!(report.added, 0);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unflushed_documents_are_persisted_by_next_run() {
        let dir = fixture();
        let db = TempDir::new().unwrap();
        let blocker = db.path().join("db");
        std::fs::write(&blocker, b"").unwrap();
        let snapshot = blocker.join("corpus.json");
        let store = Arc::new(MemoryCorpusStore::new(MemoryStoreConfig {
            snapshot_path: Some(snapshot.clone()),
            ..Default::default()
        }));
        let pipeline = pipeline(store.clone(), Arc::new(ByteCountEmbedder::default()), false);

        assert!(pipeline.ingest(dir.path()).await.is_err());
        assert_eq!(store.count().await.unwrap(), 2);

        std::fs::remove_file(&blocker).unwrap();
        let report = pipeline.ingest(dir.path()).await.unwrap();
        assert_eq!(report.added, 0);
        assert_eq!(report.skipped_existing, 2);
        assert!(snapshot.exists());

        let reopened = MemoryCorpusStore::open(MemoryStoreConfig {
            snapshot_path: Some(snapshot),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(reopened.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_source_that_is_not_a_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("shots");
        std::fs::write(&file, b"").unwrap();
        let store = Arc::new(MemoryCorpusStore::new_default());
        let pipeline = pipeline(store, Arc::new(ByteCountEmbedder::default()), false);

        assert!(pipeline.ingest(&file.join("inner")).await.is_err());
    }
}
