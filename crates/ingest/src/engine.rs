//! Ingestion engine: convert, chunk, write, for one file or a folder.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use ragchunk_core::{Config, IngestError};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::document::chunker::{chunk_document, ChunkConfig};
use crate::document::convert_file;
use crate::output::{write_outputs, ChunkedDocument};

/// Result of processing one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub total_chunks: usize,
}

/// Counts for a folder run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub processed: usize,
    /// Files with no extractable content.
    pub skipped: usize,
    pub failed: usize,
}

pub struct IngestionEngine {
    config: Config,
    chunk_config: ChunkConfig,
}

impl IngestionEngine {
    pub fn new(config: Config) -> Self {
        let chunk_config = ChunkConfig::from(&config.chunking);
        Self {
            config,
            chunk_config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert, chunk and persist a single file.
    ///
    /// Fails with `EmptyDocument` when the file has no text; callers treat
    /// that as a skip rather than a failure.
    pub fn process_file(&self, path: &Path) -> Result<ProcessedDocument, IngestError> {
        if !path.is_file() {
            return Err(IngestError::InvalidPath(path.display().to_string()));
        }
        if !self.config.storage.is_supported_file(path) {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string();
            return Err(IngestError::UnsupportedType(ext));
        }

        let converted = convert_file(path)?;
        let filename = converted.metadata.filename.clone();
        if converted.markdown.trim().is_empty() {
            return Err(IngestError::EmptyDocument(filename));
        }
        info!(file = %filename, "processing");

        let metadata = converted.metadata.to_metadata(&self.config.metadata);
        let chunks = chunk_document(&converted.markdown, &metadata, &self.chunk_config);
        let chunked = ChunkedDocument::new(filename.clone(), chunks, &self.chunk_config);

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| IngestError::InvalidPath(path.display().to_string()))?;
        let output_dir = write_outputs(
            &self.config.storage.processed_docs_dir,
            stem,
            &converted.markdown,
            &converted.metadata,
            &chunked,
        )?;

        info!(
            file = %filename,
            chunks = chunked.total_chunks,
            output = %output_dir.display(),
            "processed"
        );
        Ok(ProcessedDocument {
            source: path.to_path_buf(),
            output_dir,
            total_chunks: chunked.total_chunks,
        })
    }

    /// Supported files directly inside `dir` (not recursive), sorted by path.
    pub fn supported_files(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && self.config.storage.is_supported_file(p))
            .collect();
        files.sort();
        files
    }

    /// Process every supported file in `dir` in parallel. Per-file errors are
    /// logged and counted; they never stop the batch.
    pub fn process_folder(&self, dir: &Path) -> ProcessSummary {
        info!("Scanning folder: {}", dir.display());
        let files = self.supported_files(dir);
        info!(
            "Found {} supported file(s), processing with {} threads",
            files.len(),
            rayon::current_num_threads()
        );
        let groups = group_by_stem(files);

        let processed = AtomicUsize::new(0);
        let skipped = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);

        // Files sharing a stem write to the same output directory, so each
        // group runs sequentially; groups run in parallel.
        groups.par_iter().for_each(|(stem, group)| {
            if group.len() > 1 {
                warn!(
                    stem = %stem,
                    files = group.len(),
                    "files share an output directory, later files overwrite earlier ones"
                );
            }
            for path in group {
                match self.process_file(path) {
                    Ok(_) => {
                        processed.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(IngestError::EmptyDocument(name)) => {
                        warn!(file = %name, "no content extracted, skipping");
                        skipped.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(e) => {
                        warn!(file = %path.display(), error = %e, "failed to process");
                        failed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        });

        ProcessSummary {
            processed: processed.into_inner(),
            skipped: skipped.into_inner(),
            failed: failed.into_inner(),
        }
    }
}

/// Group paths by file stem, keeping each group in path order.
fn group_by_stem(files: Vec<PathBuf>) -> Vec<(String, Vec<PathBuf>)> {
    let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for path in files {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        groups.entry(stem).or_default().push(path);
    }
    groups.into_iter().collect()
}
