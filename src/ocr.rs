//! Optical character recognition for screenshots.
//!
//! The [`OcrEngine`] trait is the seam; [`TesseractOcr`] runs the `tesseract`
//! command-line tool and reads the recognized text from its stdout.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::error::{Result, ScreenrackError};
use crate::image::ImageData;

/// Extracts printable text from an image.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize text in `image`. Implementations return trimmed text.
    async fn recognize(&self, image: &ImageData) -> Result<String>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Settings for [`TesseractOcr`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseractConfig {
    /// Path to the tesseract binary; looked up on `PATH` when relative.
    pub binary: PathBuf,
    /// Language passed with `-l`, if any.
    pub language: Option<String>,
    /// Extra arguments appended after `stdout` (e.g. `--psm 6`).
    pub extra_args: Vec<String>,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            language: None,
            extra_args: Vec::new(),
        }
    }
}

/// OCR backed by the tesseract CLI.
#[derive(Debug, Clone, Default)]
pub struct TesseractOcr {
    config: TesseractConfig,
}

impl TesseractOcr {
    pub fn new(config: TesseractConfig) -> Self {
        Self { config }
    }

    fn command(&self, image: &ImageData) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        cmd.arg(&image.path).arg("stdout");
        if let Some(lang) = &self.config.language {
            cmd.arg("-l").arg(lang);
        }
        cmd.args(&self.config.extra_args);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, image: &ImageData) -> Result<String> {
        let output = self.command(image).output().await.map_err(|err| {
            ScreenrackError::ocr(format!(
                "run {}: {}",
                self.config.binary.display(),
                err
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScreenrackError::ocr(format!(
                "{} exited with {}: {}",
                self.config.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!(
            "OCR extracted {} chars from {}",
            text.len(),
            image.path.display()
        );
        Ok(text)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
