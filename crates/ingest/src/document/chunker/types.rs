//! Chunk configuration and output types.

use std::collections::BTreeMap;
use std::fmt;

use ragchunk_core::ChunkingConfig;
use serde::{Deserialize, Serialize};

/// Caller-supplied key/value metadata copied onto every chunk.
pub type Metadata = BTreeMap<String, serde_json::Value>;

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine. Sizes are in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Target (soft maximum) chunk size (default: 1000).
    pub chunk_size: usize,
    /// Characters of the previous text chunk repeated at the start of the next (default: 150).
    pub chunk_overlap: usize,
    /// Minimum trimmed size; smaller pieces are dropped (default: 100).
    pub min_chunk_size: usize,
    /// Keep Markdown tables intact as `table` chunks (default: true).
    pub preserve_tables: bool,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 150,
            min_chunk_size: 100,
            preserve_tables: true,
        }
    }
}

impl ChunkConfig {
    /// Overlap actually applied: zero when it would swallow a whole chunk.
    pub(crate) fn effective_overlap(&self) -> usize {
        if self.chunk_overlap >= self.chunk_size {
            0
        } else {
            self.chunk_overlap
        }
    }

    /// Minimum actually enforced. A minimum above the target size would drop
    /// nearly everything, so it is ignored and only empty pieces are dropped.
    pub(crate) fn effective_min_size(&self) -> usize {
        if self.min_chunk_size > self.chunk_size {
            1
        } else {
            self.min_chunk_size.max(1)
        }
    }
}

impl From<&ChunkingConfig> for ChunkConfig {
    fn from(c: &ChunkingConfig) -> Self {
        Self {
            chunk_size: c.chunk_size,
            chunk_overlap: c.chunk_overlap,
            min_chunk_size: c.min_chunk_size,
            preserve_tables: c.preserve_tables,
        }
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// Classification of a chunk's content.
///
/// `List` and `Code` are reserved; the engine currently emits only `Text` and `Table`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
    Text,
    Table,
    List,
    Code,
}

impl ChunkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkType::Text => "text",
            ChunkType::Table => "table",
            ChunkType::List => "list",
            ChunkType::Code => "code",
        }
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chunk of Markdown with metadata for attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Trimmed chunk text; never empty.
    pub content: String,
    /// 0-based index within the document.
    #[serde(rename = "chunk_index")]
    pub index: usize,
    /// Copy of the caller's metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// Text of the nearest enclosing heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_context: Option<String>,
    pub chunk_type: ChunkType,
}
