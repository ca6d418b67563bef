//! Output writer: persists a processed document next to its chunks.
//!
//! Layout under the output root, one directory per source document:
//!
//! ```text
//! <root>/<stem>/<stem>.md              front matter + Markdown body
//! <root>/<stem>/<stem>_metadata.json   DocumentMetadata
//! <root>/<stem>/<stem>_chunks.json     ChunkedDocument
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use ragchunk_core::IngestError;
use serde::{Deserialize, Serialize};

use crate::document::chunker::{Chunk, ChunkConfig};
use crate::document::DocumentMetadata;

/// Chunks of one document plus the parameters that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkedDocument {
    pub source_file: String,
    pub total_chunks: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub chunks: Vec<Chunk>,
}

impl ChunkedDocument {
    pub fn new(source_file: impl Into<String>, chunks: Vec<Chunk>, config: &ChunkConfig) -> Self {
        Self {
            source_file: source_file.into(),
            total_chunks: chunks.len(),
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            chunks,
        }
    }
}

/// Markdown body prefixed with a front-matter header.
pub fn render_markdown(markdown: &str, metadata: &DocumentMetadata) -> String {
    let mut out = String::with_capacity(markdown.len() + 256);
    out.push_str("---\n");
    let _ = writeln!(out, "filename: {}", metadata.filename);
    let _ = writeln!(
        out,
        "date_created: {}",
        metadata.date_created.as_deref().unwrap_or("unknown")
    );
    let _ = writeln!(out, "date_processed: {}", metadata.date_processed);
    let _ = writeln!(out, "title: {}", metadata.title.as_deref().unwrap_or("untitled"));
    let _ = match metadata.page_count {
        Some(n) => writeln!(out, "page_count: {n}"),
        None => writeln!(out, "page_count: unknown"),
    };
    let _ = writeln!(out, "has_tables: {}", metadata.has_tables);
    out.push_str("---\n\n");
    out.push_str(markdown);
    out
}

/// Write the Markdown, metadata and chunk files for one document.
/// Returns the document's output directory.
pub fn write_outputs(
    output_root: &Path,
    stem: &str,
    markdown: &str,
    metadata: &DocumentMetadata,
    chunked: &ChunkedDocument,
) -> Result<PathBuf, IngestError> {
    let output_dir = output_root.join(stem);
    std::fs::create_dir_all(&output_dir)?;

    std::fs::write(
        output_dir.join(format!("{stem}.md")),
        render_markdown(markdown, metadata),
    )?;
    std::fs::write(
        output_dir.join(format!("{stem}_metadata.json")),
        serde_json::to_string_pretty(metadata)?,
    )?;
    std::fs::write(
        output_dir.join(format!("{stem}_chunks.json")),
        serde_json::to_string_pretty(chunked)?,
    )?;

    Ok(output_dir)
}
