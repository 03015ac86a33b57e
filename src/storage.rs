//! Corpus storage for indexed screenshots.
//!
//! The ranker and the ingestion pipeline only see the [`CorpusStore`] trait:
//! nearest-neighbor lookup by vector, substring lookup by OCR text, and
//! upsert/get by id. [`MemoryCorpusStore`] is the bundled backend, an
//! in-process store that can be snapshotted to a JSON file.
//!
//! # Example
//!
//! ```
//! use screenrack::storage::{CorpusStore, MemoryCorpusStore};
//!
//! # async fn example() -> screenrack::error::Result<()> {
//! let store = MemoryCorpusStore::new_default();
//! assert_eq!(store.count().await?, 0);
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod traits;

pub use memory::{MemoryCorpusStore, MemoryStoreConfig};
pub use traits::{CorpusStore, TextHit, VectorHit};
