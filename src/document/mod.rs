//! Document loading, chunking, and lexical indexing
//!
//! The report is loaded and indexed once at startup; the index is read-only
//! for the lifetime of the process and can be shared across concurrent runs.

pub mod chunker;
pub mod index;
pub mod loader;

pub use chunker::{chunk_document, Chunk};
pub use index::{DocumentIndex, ScoredChunk, SearchParams};
pub use loader::{Document, DocumentType};
