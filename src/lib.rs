//! # Screenrack
//!
//! Hybrid search over a folder of screenshots.
//!
//! Every screenshot is indexed twice over: as an image embedding and as the
//! text OCR finds in it. A query runs a semantic (vector) search and a keyword
//! (text containment) search against the same corpus and merges both into one
//! ranked list.
//!
//! ## Modules
//!
//! - [`hybrid_search`]: the merge-and-rank engine
//! - [`ingest`]: turns image files into corpus documents
//! - [`storage`]: the corpus store seam and an in-memory implementation
//! - [`embedding`] and [`ocr`]: collaborator traits and their shipped backends
//! - [`server`] and [`cli`]: the HTTP service and the command line front end

pub mod cli;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod hybrid_search;
pub mod image;
pub mod ingest;
pub mod ocr;
pub mod server;
pub mod service;
pub mod storage;
pub mod util;
pub mod vector;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
