//! Screenshot image loading.

use std::path::{Path, PathBuf};

use crate::error::{Result, ScreenrackError};

/// File extensions accepted for indexing, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Returns true when `path` has one of the [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// A screenshot loaded into memory.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Where the image was read from.
    pub path: PathBuf,
    /// Raw encoded bytes (PNG, JPEG or WebP).
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// Wrap already-loaded bytes.
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    /// Read an image from disk.
    pub async fn load(path: &Path) -> Result<Self> {
        if !is_supported_image(path) {
            return Err(ScreenrackError::invalid_argument(format!(
                "unsupported image type: {}",
                path.display()
            )));
        }
        let bytes = tokio::fs::read(path).await?;
        if bytes.is_empty() {
            return Err(ScreenrackError::invalid_argument(format!(
                "image file is empty: {}",
                path.display()
            )));
        }
        Ok(Self::new(path, bytes))
    }

    /// File name of the image.
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// MIME type derived from the extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }
}
