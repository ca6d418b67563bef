//! Markdown ingestion for retrieval pipelines.
//!
//! - [`document`]: converters (Markdown, plain text) and the semantic chunker.
//! - [`output`]: JSON / Markdown persistence of processed documents.
//! - [`engine`]: single-file and parallel folder processing.

pub mod document;
pub mod engine;
pub mod output;

pub use document::chunker::{chunk_document, Chunk, ChunkConfig, ChunkType, Metadata};
pub use engine::{IngestionEngine, ProcessSummary, ProcessedDocument};
