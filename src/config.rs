//! Application configuration.
//!
//! Every section has defaults, so an absent or partial JSON file is valid.
//! Command line flags and `SCREENRACK_*` environment variables are applied
//! on top of the loaded file by the CLI.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::embedding::HttpEmbedderConfig;
use crate::error::{Result, ScreenrackError};
use crate::hybrid_search::HybridSearchConfig;
use crate::ingest::IngestConfig;
use crate::ocr::TesseractConfig;
use crate::storage::MemoryStoreConfig;
use crate::vector::DistanceMetric;

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the query service binds to.
    pub bind: SocketAddr,
    /// Origin allowed by CORS. `None` disables the CORS layer.
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_origin: Some("http://localhost:5173".to_string()),
        }
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned for screenshots and served under `/screenshots`.
    pub screenshots_dir: PathBuf,
    /// JSON snapshot of the corpus store.
    pub store_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            screenshots_dir: PathBuf::from("screenshots"),
            store_path: PathBuf::from("db/screenrack.json"),
        }
    }
}

/// Corpus store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Distance used for nearest-neighbor lookup. Must match the metric the
    /// embedding model was trained for.
    pub metric: DistanceMetric,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenrackConfig {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub store: StoreConfig,
    pub embedder: HttpEmbedderConfig,
    pub ocr: TesseractConfig,
    pub ingest: IngestConfig,
    pub search: HybridSearchConfig,
}

impl ScreenrackConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ScreenrackError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            ScreenrackError::config(format!("invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        if self.embedder.base_url.trim().is_empty() {
            return Err(ScreenrackError::config("embedder.base_url must not be empty"));
        }
        if self.ingest.extraction_timeout_ms == 0 {
            return Err(ScreenrackError::config(
                "ingest.extraction_timeout_ms must be positive",
            ));
        }
        Ok(())
    }

    /// Store settings backed by the configured snapshot path.
    pub fn store_config(&self) -> MemoryStoreConfig {
        MemoryStoreConfig {
            metric: self.store.metric,
            snapshot_path: Some(self.paths.store_path.clone()),
        }
    }
}
