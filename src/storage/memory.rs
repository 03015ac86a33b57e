//! In-memory corpus store with optional JSON snapshot persistence.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use log::{debug, info};
use parking_lot::RwLock;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{Result, ScreenrackError};
use crate::storage::traits::{CorpusStore, TextHit, VectorHit};
use crate::vector::{DistanceMetric, Vector};

/// Configuration for [`MemoryCorpusStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStoreConfig {
    /// Metric used for nearest-neighbor queries.
    pub metric: DistanceMetric,
    /// Snapshot file. `None` keeps the store purely in memory.
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Documents in insertion order.
    documents: Vec<Document>,
    /// id -> position in `documents`.
    positions: HashMap<String, usize>,
    /// Vector length shared by every document, fixed by the first one stored.
    dimension: Option<usize>,
}

impl Inner {
    fn upsert(&mut self, document: Document) -> Result<()> {
        let dimension = document.vector.dimension();
        match self.dimension {
            Some(expected) if expected != dimension => {
                return Err(ScreenrackError::store(format!(
                    "document {} has a {}-dimensional vector, the corpus uses {}",
                    document.id, dimension, expected
                )));
            }
            Some(_) => {}
            None => self.dimension = Some(dimension),
        }

        match self.positions.get(&document.id) {
            Some(&pos) => self.documents[pos] = document,
            None => {
                self.positions
                    .insert(document.id.clone(), self.documents.len());
                self.documents.push(document);
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    documents: Vec<Document>,
}

/// A corpus store held in memory.
///
/// Nearest-neighbor search is an exact scan parallelized with rayon; ties
/// in distance keep insertion order. Writes mark the store dirty and are
/// written out by [`CorpusStore::flush`] when a snapshot path is configured.
#[derive(Debug)]
pub struct MemoryCorpusStore {
    inner: RwLock<Inner>,
    config: MemoryStoreConfig,
    dirty: AtomicBool,
}

impl MemoryCorpusStore {
    /// Create an empty store.
    pub fn new(config: MemoryStoreConfig) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            config,
            dirty: AtomicBool::new(false),
        }
    }

    /// Create an empty, non-persistent store with the default metric.
    pub fn new_default() -> Self {
        Self::new(MemoryStoreConfig::default())
    }

    /// Open a store, loading its snapshot file if one exists.
    pub async fn open(config: MemoryStoreConfig) -> Result<Self> {
        let store = Self::new(config);
        if let Some(path) = store.config.snapshot_path.clone() {
            store.load_snapshot(&path).await?;
        }
        Ok(store)
    }

    async fn load_snapshot(&self, path: &Path) -> Result<()> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {}, starting empty", path.display());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot = serde_json::from_slice(&bytes).map_err(|e| {
            ScreenrackError::store(format!("corrupt snapshot {}: {}", path.display(), e))
        })?;

        let mut inner = self.inner.write();
        for document in snapshot.documents {
            inner.upsert(document).map_err(|e| {
                ScreenrackError::store(format!("corrupt snapshot {}: {}", path.display(), e))
            })?;
        }
        info!(
            "Loaded {} documents from {}",
            inner.documents.len(),
            path.display()
        );
        Ok(())
    }
}

impl Default for MemoryCorpusStore {
    fn default() -> Self {
        Self::new_default()
    }
}

#[async_trait]
impl CorpusStore for MemoryCorpusStore {
    async fn query(&self, vector: &Vector, k: usize) -> Result<Vec<VectorHit>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let inner = self.inner.read();
        let metric = self.config.metric;
        let mut scored = inner
            .documents
            .par_iter()
            .enumerate()
            .map(|(pos, doc)| {
                metric
                    .distance(&vector.data, &doc.vector.data)
                    .map(|distance| (pos, distance))
            })
            .collect::<Result<Vec<(usize, f32)>>>()?;

        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(pos, distance)| {
                let doc = &inner.documents[pos];
                VectorHit {
                    id: doc.id.clone(),
                    distance,
                    metadata: doc.metadata.clone(),
                    text: doc.text.clone(),
                }
            })
            .collect())
    }

    async fn query_by_text_contains(&self, substring: &str) -> Result<Vec<TextHit>> {
        let inner = self.inner.read();
        Ok(inner
            .documents
            .iter()
            .filter(|doc| doc.text.contains(substring))
            .map(|doc| TextHit {
                id: doc.id.clone(),
                metadata: doc.metadata.clone(),
                text: doc.text.clone(),
            })
            .collect())
    }

    async fn upsert(&self, document: Document) -> Result<()> {
        if document.id.is_empty() {
            return Err(ScreenrackError::invalid_argument("document id must not be empty"));
        }
        self.inner.write().upsert(document)?;
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Document>> {
        let inner = self.inner.read();
        Ok(inner
            .positions
            .get(id)
            .map(|&pos| inner.documents[pos].clone()))
    }

    async fn ids(&self) -> Result<HashSet<String>> {
        Ok(self.inner.read().positions.keys().cloned().collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().documents.len())
    }

    async fn flush(&self) -> Result<()> {
        let Some(path) = self.config.snapshot_path.as_ref() else {
            return Ok(());
        };
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(());
        }

        let snapshot = Snapshot {
            documents: self.inner.read().documents.clone(),
        };
        if let Err(e) = write_snapshot(path, &snapshot).await {
            // keep the store dirty so the next flush retries
            self.dirty.store(true, Ordering::Release);
            return Err(e);
        }

        debug!("Wrote snapshot to {}", path.display());
        Ok(())
    }
}

/// Write `snapshot` to `path` through a temporary file and a rename.
async fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let bytes = serde_json::to_vec(snapshot)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
