//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use screenrack::config::ScreenrackConfig;
use screenrack::embedding::{ImageEmbedder, TextEmbedder};
use screenrack::error::{Result, ScreenrackError};
use screenrack::image::ImageData;
use screenrack::ocr::OcrEngine;
use screenrack::vector::Vector;

/// Embeds text and images into a tiny "topic" space: one dimension per
/// keyword, set when the keyword occurs (case-insensitively).
///
/// Images are fake: their bytes are the text that OCR will "see", so a
/// screenshot of a terminal error lands near the query "error".
#[derive(Default)]
pub struct TopicEmbedder {
    pub text_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
    pub fail_text: bool,
}

pub const TOPICS: &[&str] = &["error", "invoice", "merge", "meeting"];

fn topic_vector(text: &str) -> Vector {
    let lower = text.to_lowercase();
    let mut data: Vec<f32> = TOPICS
        .iter()
        .map(|topic| if lower.contains(topic) { 1.0 } else { 0.0 })
        .collect();
    // keeps every vector non-zero and distinct from pure topic vectors
    data.push(0.1);
    Vector::new(data)
}

#[async_trait]
impl TextEmbedder for TopicEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vector> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_text {
            return Err(ScreenrackError::embedding("text model offline"));
        }
        Ok(topic_vector(text))
    }
}

#[async_trait]
impl ImageEmbedder for TopicEmbedder {
    async fn embed_image(&self, image: &ImageData) -> Result<Vector> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        Ok(topic_vector(&String::from_utf8_lossy(&image.bytes)))
    }
}

/// Reads the fake image bytes back as text.
pub struct PlainTextOcr;

#[async_trait]
impl OcrEngine for PlainTextOcr {
    async fn recognize(&self, image: &ImageData) -> Result<String> {
        Ok(String::from_utf8_lossy(&image.bytes).trim().to_string())
    }
}

/// Write fake screenshots into `dir`.
pub fn write_screenshots(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    for (name, text) in [
        ("terminal.png", "error: linker `cc` not found"),
        ("invoice.jpg", "INVOICE #1042 total due"),
        ("github.webp", "Pull request merged into main"),
        ("notes.txt", "not a screenshot"),
    ] {
        std::fs::write(dir.join(name), text).unwrap();
    }
}

/// Configuration rooted in a temporary directory.
pub fn test_config(root: &Path) -> ScreenrackConfig {
    let mut config = ScreenrackConfig::default();
    config.paths.screenshots_dir = root.join("screenshots");
    config.paths.store_path = root.join("db").join("screenrack.json");
    config.search.retrieval_timeout_ms = 1_000;
    config.ingest.extraction_timeout_ms = 1_000;
    config
}
