//! Chunking strategy: heading sections, intact tables, size-bounded text,
//! then overlap between neighbouring text chunks.

use tracing::debug;

use super::helpers::{char_len, overlap_fragment, split_text};
use super::regions::{locate_protected_regions, ProtectedRegions};
use super::sections::{split_by_headings, Section};
use super::types::{Chunk, ChunkConfig, ChunkType, Metadata};

/// Marks the start of text repeated from the previous chunk.
pub const OVERLAP_MARKER: &str = "[...]";

/// Chunk a Markdown document.
///
/// Returns chunks with contiguous indices starting at 0, each carrying a copy
/// of `metadata`. Never fails: empty input yields no chunks, and a degenerate
/// `config` disables the affected behaviour instead of erroring.
pub fn chunk_document(markdown: &str, metadata: &Metadata, config: &ChunkConfig) -> Vec<Chunk> {
    let regions = locate_protected_regions(markdown, config.preserve_tables);
    let sections = split_by_headings(markdown);
    debug!(
        sections = sections.len(),
        tables = regions.tables().count(),
        code_fences = regions.code_fences().count(),
        "located document structure"
    );

    let min_size = config.effective_min_size();
    if config.min_chunk_size > config.chunk_size {
        debug!(
            min_chunk_size = config.min_chunk_size,
            chunk_size = config.chunk_size,
            "minimum chunk size disabled"
        );
    }

    let mut chunks = Vec::new();
    for section in &sections {
        for (content, chunk_type) in chunk_section(section, &regions, config) {
            let content = content.trim();
            if char_len(content) < min_size {
                continue;
            }
            chunks.push(Chunk {
                content: content.to_string(),
                index: chunks.len(),
                metadata: metadata.clone(),
                heading_context: section.heading.map(str::to_string),
                chunk_type,
            });
        }
    }

    let overlap = config.effective_overlap();
    if overlap != config.chunk_overlap {
        debug!(
            chunk_overlap = config.chunk_overlap,
            chunk_size = config.chunk_size,
            "overlap disabled"
        );
    }
    apply_overlap(chunks, overlap)
}

/// Chunk Markdown with the default settings, overriding size and overlap.
pub fn chunk_markdown(
    markdown: &str,
    metadata: &Metadata,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Vec<Chunk> {
    let config = ChunkConfig {
        chunk_size,
        chunk_overlap,
        ..ChunkConfig::default()
    };
    chunk_document(markdown, metadata, &config)
}

// ── Section assembly ────────────────────────────────────────────────────────

/// Split one section into typed pieces: tables verbatim, everything between
/// them through the size-bounded splitter.
///
/// Only tables are protected here. Code fences are located but may still be
/// split like ordinary text.
fn chunk_section(
    section: &Section<'_>,
    regions: &ProtectedRegions<'_>,
    config: &ChunkConfig,
) -> Vec<(String, ChunkType)> {
    let mut pieces = Vec::new();
    let text_pieces = |text: &str| {
        split_text(text, config.chunk_size)
            .into_iter()
            .map(|p| (p, ChunkType::Text))
    };

    let mut cursor = section.start;
    for table in regions.tables_within(section.start, section.end) {
        if table.start > cursor {
            let before = &section.content[cursor - section.start..table.start - section.start];
            pieces.extend(text_pieces(before));
        }
        pieces.push((table.content.to_string(), ChunkType::Table));
        cursor = table.end;
    }
    if cursor < section.end {
        pieces.extend(text_pieces(&section.content[cursor - section.start..]));
    }
    pieces
}

// ── Overlap ─────────────────────────────────────────────────────────────────

/// Prepend a word-aligned tail of each text chunk to the text chunk after it.
///
/// Walks backwards so every predecessor is still in its pre-overlap state
/// when read; overlap never cascades.
fn apply_overlap(mut chunks: Vec<Chunk>, overlap: usize) -> Vec<Chunk> {
    if overlap == 0 || chunks.len() < 2 {
        return chunks;
    }
    for i in (1..chunks.len()).rev() {
        let (head, tail) = chunks.split_at_mut(i);
        let prev = &head[i - 1];
        let curr = &mut tail[0];
        if prev.chunk_type != ChunkType::Text || curr.chunk_type != ChunkType::Text {
            continue;
        }
        if let Some(fragment) = overlap_fragment(&prev.content, overlap) {
            curr.content = format!("{OVERLAP_MARKER} {fragment}\n\n{}", curr.content);
        }
    }
    chunks
}
