//! Error types for the Screenrack library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`ScreenrackError`] enum. Per-document ingestion failures and per-path
//! retrieval failures are contained by their callers and logged; they only
//! surface as this type when an entire operation cannot proceed.
//!
//! # Examples
//!
//! ```
//! use screenrack::error::{Result, ScreenrackError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ScreenrackError::invalid_argument("query must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Screenrack operations.
#[derive(Error, Debug)]
pub enum ScreenrackError {
    /// I/O errors (file operations, sockets, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Embedding generation failed or returned an unusable vector.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Optical character recognition failed.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Corpus store errors (lookup, upsert, snapshot).
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration could not be loaded or a backend is unreachable at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A call to an external collaborator exceeded its deadline.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid argument supplied by the caller.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP client errors talking to the embedding service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with ScreenrackError.
pub type Result<T> = std::result::Result<T, ScreenrackError>;

impl ScreenrackError {
    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        ScreenrackError::Embedding(msg.into())
    }

    /// Create a new OCR error.
    pub fn ocr<S: Into<String>>(msg: S) -> Self {
        ScreenrackError::Ocr(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        ScreenrackError::Store(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ScreenrackError::Config(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        ScreenrackError::Timeout(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ScreenrackError::InvalidArgument(msg.into())
    }
}
