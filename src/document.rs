//! Indexed screenshot documents.
//!
//! A [`Document`] is one screenshot as seen by the corpus store: a stable id
//! (the source filename), the OCR text, the image embedding and a small
//! metadata record pointing back at the asset on disk.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// Metadata stored alongside every document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Location of the underlying image.
    pub path: String,
    /// File name of the image, which is also the document id.
    pub filename: String,
    /// When the document was written to the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_at: Option<DateTime<Utc>>,
}

impl DocumentMetadata {
    /// Create metadata for an asset at `path`.
    pub fn new<S: Into<String>>(path: S, filename: S) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
            indexed_at: None,
        }
    }

    /// Build metadata from a file path, using the file name as `filename`.
    pub fn from_path(path: &Path) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(path.to_string_lossy().into_owned(), filename)
    }

    /// Stamp the metadata with an indexing time.
    pub fn with_indexed_at(mut self, at: DateTime<Utc>) -> Self {
        self.indexed_at = Some(at);
        self
    }
}

/// One indexed screenshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique, stable identifier. The only merge key between retrieval paths.
    pub id: String,
    /// OCR text, possibly empty.
    pub text: String,
    /// Image embedding.
    pub vector: Vector,
    /// Asset location and bookkeeping.
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Create a new document.
    pub fn new<S: Into<String>>(
        id: S,
        text: S,
        vector: Vector,
        metadata: DocumentMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            vector,
            metadata,
        }
    }
}
