//! Semantic chunking engine for Markdown.
//!
//! Splits a document into bounded-size chunks suitable for embedding:
//! sections follow headings, tables stay intact, oversized text falls back
//! from paragraphs to sentences to words, and neighbouring text chunks share
//! a short word-aligned overlap.

mod helpers;
mod regions;
mod sections;
mod strategies;
mod types;

pub use strategies::{chunk_document, chunk_markdown, OVERLAP_MARKER};
pub use types::{Chunk, ChunkConfig, ChunkType, Metadata};

/// Whether `markdown` contains at least one table block.
pub fn has_tables(markdown: &str) -> bool {
    regions::locate_protected_regions(markdown, true)
        .tables()
        .next()
        .is_some()
}

/// Text of the first heading in `markdown`, if any.
pub fn first_heading(markdown: &str) -> Option<&str> {
    markdown.lines().find_map(sections::heading_text)
}
