use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key) {
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on"),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub storage: StorageConfig,
    pub chunking: ChunkingConfig,
    pub metadata: MetadataConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `RAGCHUNK_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("RAGCHUNK_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            storage: StorageConfig::from_env_profiled(p),
            chunking: ChunkingConfig::from_env_profiled(p),
            metadata: MetadataConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  storage:     raw_docs={}, processed_docs={}",
            self.storage.raw_docs_dir.display(),
            self.storage.processed_docs_dir.display()
        );
        tracing::info!("  extensions:  {}", self.storage.supported_extensions.join(","));
        tracing::info!(
            "  chunking:    size={}, overlap={}, min={}, preserve_tables={}",
            self.chunking.chunk_size,
            self.chunking.chunk_overlap,
            self.chunking.min_chunk_size,
            self.chunking.preserve_tables
        );
    }
}

// ── Storage ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub raw_docs_dir: PathBuf,
    pub processed_docs_dir: PathBuf,
    /// Lowercase extensions without the leading dot.
    pub supported_extensions: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            raw_docs_dir: PathBuf::from("raw_docs"),
            processed_docs_dir: PathBuf::from("processed_docs"),
            supported_extensions: parse_extensions(DEFAULT_EXTENSIONS),
        }
    }
}

const DEFAULT_EXTENSIONS: &str = "md,markdown,txt";

fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

impl StorageConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            raw_docs_dir: PathBuf::from(profiled_env_or(p, "RAW_DOCS_DIR", "raw_docs")),
            processed_docs_dir: PathBuf::from(profiled_env_or(
                p,
                "PROCESSED_DOCS_DIR",
                "processed_docs",
            )),
            supported_extensions: parse_extensions(&profiled_env_or(
                p,
                "SUPPORTED_EXTENSIONS",
                DEFAULT_EXTENSIONS,
            )),
        }
    }

    /// Whether `path` has one of the supported extensions (case-insensitive).
    pub fn is_supported_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_lowercase();
                self.supported_extensions.iter().any(|s| *s == e)
            })
            .unwrap_or(false)
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between adjacent text chunks in characters.
    pub chunk_overlap: usize,
    /// Chunks shorter than this (after trimming) are dropped.
    pub min_chunk_size: usize,
    /// Keep Markdown tables intact as their own chunks.
    pub preserve_tables: bool,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 150,
            min_chunk_size: 100,
            preserve_tables: true,
        }
    }
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            chunk_size: profiled_env_usize(p, "CHUNK_SIZE", d.chunk_size),
            chunk_overlap: profiled_env_usize(p, "CHUNK_OVERLAP", d.chunk_overlap),
            min_chunk_size: profiled_env_usize(p, "MIN_CHUNK_SIZE", d.min_chunk_size),
            preserve_tables: profiled_env_bool(p, "PRESERVE_TABLES", d.preserve_tables),
        }
    }
}

// ── Metadata ──────────────────────────────────────────────────

/// Which document metadata fields are copied onto every chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub include_filename: bool,
    pub include_date_created: bool,
    pub include_date_processed: bool,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            include_filename: true,
            include_date_created: true,
            include_date_processed: true,
        }
    }
}

impl MetadataConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            include_filename: profiled_env_bool(p, "INCLUDE_FILENAME", true),
            include_date_created: profiled_env_bool(p, "INCLUDE_DATE_CREATED", true),
            include_date_processed: profiled_env_bool(p, "INCLUDE_DATE_PROCESSED", true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let config = Config::default();
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 150);
        assert_eq!(config.chunking.min_chunk_size, 100);
        assert!(config.chunking.preserve_tables);
        assert_eq!(config.profile_label(), "default");
    }

    #[test]
    fn profiled_key_wins_over_plain_key() {
        // Unique profile name keeps this test independent of the real env.
        env::set_var("RCTESTPROFILE_CHUNK_SIZE", "640");
        env::set_var("RCTESTPROFILE_PRESERVE_TABLES", "false");
        let config = Config::for_profile("rctestprofile");
        assert_eq!(config.profile, "RCTESTPROFILE");
        assert_eq!(config.chunking.chunk_size, 640);
        assert!(!config.chunking.preserve_tables);
        env::remove_var("RCTESTPROFILE_CHUNK_SIZE");
        env::remove_var("RCTESTPROFILE_PRESERVE_TABLES");
    }

    #[test]
    fn extension_list_is_normalized() {
        assert_eq!(parse_extensions(" .MD, txt ,,"), vec!["md", "txt"]);
    }

    #[test]
    fn supported_file_check_ignores_case() {
        let storage = StorageConfig::default();
        assert!(storage.is_supported_file(Path::new("notes/Guide.MD")));
        assert!(storage.is_supported_file(Path::new("a.txt")));
        assert!(!storage.is_supported_file(Path::new("report.pdf")));
        assert!(!storage.is_supported_file(Path::new("README")));
    }
}
