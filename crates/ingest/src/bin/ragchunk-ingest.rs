//! ragchunk-ingest: convert Markdown / text documents into RAG-ready chunks.
//!
//! Processes a single file (`--file`) or every supported file in the raw
//! documents folder, writing Markdown, metadata and chunk JSON per document.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use ragchunk_core::config::load_dotenv;
use ragchunk_core::{Config, IngestError};
use ragchunk_ingest::IngestionEngine;

// ── CLI ─────────────────────────────────────────────────────────────

/// Markdown ingestion with semantic chunking for retrieval pipelines.
#[derive(Parser, Debug)]
#[command(name = "ragchunk-ingest", version, about)]
struct Cli {
    /// Process a single file and exit.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Folder of raw documents (defaults to RAW_DOCS_DIR).
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Output folder (defaults to PROCESSED_DOCS_DIR).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Target chunk size in characters.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Overlap between adjacent text chunks in characters.
    #[arg(long)]
    chunk_overlap: Option<usize>,

    /// Drop chunks shorter than this many characters.
    #[arg(long)]
    min_chunk_size: Option<usize>,

    /// Let tables be split like ordinary text.
    #[arg(long)]
    no_preserve_tables: bool,

    /// Configuration profile (overrides RAGCHUNK_PROFILE).
    #[arg(long)]
    profile: Option<String>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.input_dir {
            config.storage.raw_docs_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.storage.processed_docs_dir = dir.clone();
        }
        if let Some(n) = self.chunk_size {
            config.chunking.chunk_size = n;
        }
        if let Some(n) = self.chunk_overlap {
            config.chunking.chunk_overlap = n;
        }
        if let Some(n) = self.min_chunk_size {
            config.chunking.min_chunk_size = n;
        }
        if self.no_preserve_tables {
            config.chunking.preserve_tables = false;
        }
    }
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    load_dotenv();
    let cli = Cli::parse();

    let mut config = match &cli.profile {
        Some(p) => Config::for_profile(p),
        None => Config::from_env(),
    };
    cli.apply(&mut config);
    config.log_summary();

    let engine = IngestionEngine::new(config);

    if let Some(file) = &cli.file {
        return match engine.process_file(file) {
            Ok(doc) => {
                info!(
                    "Processed: {} -> {} ({} chunks)",
                    file.display(),
                    doc.output_dir.display(),
                    doc.total_chunks
                );
                Ok(())
            }
            Err(IngestError::EmptyDocument(name)) => {
                warn!(file = %name, "no content extracted");
                Ok(())
            }
            Err(e) => Err(e).with_context(|| format!("failed to process {}", file.display())),
        };
    }

    let input = engine.config().storage.raw_docs_dir.clone();
    if !input.is_dir() {
        anyhow::bail!("input folder not found: {}", input.display());
    }

    let summary = engine.process_folder(&input);
    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        failed = summary.failed,
        "ingestion finished"
    );
    if summary.failed > 0 {
        anyhow::bail!("{} file(s) failed to process", summary.failed);
    }
    Ok(())
}
