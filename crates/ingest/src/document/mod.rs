pub mod chunker;
mod md;
mod txt;

use std::path::Path;

use chrono::{DateTime, Utc};
use ragchunk_core::{IngestError, MetadataConfig};
use serde::{Deserialize, Serialize};

use chunker::Metadata;

/// Text extracted from a source file, with the facts the converter can see.
#[derive(Debug, Clone, Default)]
pub struct ExtractedText {
    /// Markdown (or plain) text content.
    pub text: String,
    /// First heading, if the format has headings.
    pub title: Option<String>,
    pub has_tables: bool,
    pub has_images: bool,
}

/// Metadata extracted from and about a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub filename: String,
    pub original_path: String,
    pub file_extension: String,
    pub file_size_bytes: u64,
    pub date_created: Option<String>,
    pub date_modified: Option<String>,
    pub date_processed: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_count: Option<u32>,
    pub has_tables: bool,
    pub has_images: bool,
}

impl DocumentMetadata {
    /// Per-chunk metadata map, honoring the include flags.
    pub fn to_metadata(&self, config: &MetadataConfig) -> Metadata {
        let mut map = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(obj)) => obj.into_iter().collect::<Metadata>(),
            _ => Metadata::new(),
        };
        if !config.include_filename {
            map.remove("filename");
        }
        if !config.include_date_created {
            map.remove("date_created");
        }
        if !config.include_date_processed {
            map.remove("date_processed");
        }
        map
    }
}

/// A converted document: Markdown text plus its metadata record.
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    pub markdown: String,
    pub metadata: DocumentMetadata,
}

fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Extract text from file bytes based on the file extension.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedText, IngestError> {
    match extension_of(filename).as_str() {
        "md" | "markdown" => md::extract_md(bytes),
        "txt" | "text" => txt::extract_txt(bytes),
        other => Err(IngestError::UnsupportedType(other.to_string())),
    }
}

/// Convert in-memory file bytes. File-system dates are unknown here.
pub fn convert_bytes(bytes: &[u8], filename: &str) -> Result<ConvertedDocument, IngestError> {
    let extracted = extract_text(bytes, filename)?;
    let metadata = DocumentMetadata {
        filename: filename.to_string(),
        original_path: filename.to_string(),
        file_extension: format!(".{}", extension_of(filename)),
        file_size_bytes: bytes.len() as u64,
        date_created: None,
        date_modified: None,
        date_processed: Utc::now().to_rfc3339(),
        title: extracted.title,
        author: None,
        page_count: None,
        has_tables: extracted.has_tables,
        has_images: extracted.has_images,
    };
    Ok(ConvertedDocument {
        markdown: extracted.text,
        metadata,
    })
}

/// Read and convert a file, filling in its path and file-system dates.
pub fn convert_file(path: &Path) -> Result<ConvertedDocument, IngestError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| IngestError::InvalidPath(path.display().to_string()))?;
    let bytes = std::fs::read(path)?;
    let mut converted = convert_bytes(&bytes, filename)?;

    let fs_meta = std::fs::metadata(path)?;
    let rfc3339 = |t: std::time::SystemTime| DateTime::<Utc>::from(t).to_rfc3339();
    converted.metadata.original_path = path
        .canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string();
    converted.metadata.date_created = fs_meta.created().ok().map(rfc3339);
    converted.metadata.date_modified = fs_meta.modified().ok().map(rfc3339);
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_extension() {
        assert!(extract_text(b"# T", "a.MD").is_ok());
        assert!(extract_text(b"plain", "a.txt").is_ok());
        let err = extract_text(b"%PDF", "a.pdf").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedType(ref t) if t == "pdf"));
    }

    #[test]
    fn convert_bytes_fills_metadata() {
        let doc = convert_bytes(b"# Guide\n\n| a |\n| b |\n\n![x](y.png)", "guide.md").unwrap();
        let meta = &doc.metadata;
        assert_eq!(meta.filename, "guide.md");
        assert_eq!(meta.file_extension, ".md");
        assert_eq!(meta.file_size_bytes, 33);
        assert_eq!(meta.title.as_deref(), Some("Guide"));
        assert!(meta.has_tables);
        assert!(meta.has_images);
        assert!(meta.date_created.is_none());
        assert!(!meta.date_processed.is_empty());
    }

    #[test]
    fn metadata_flags_drop_fields() {
        let doc = convert_bytes(b"text", "notes.txt").unwrap();
        let all = doc.metadata.to_metadata(&MetadataConfig::default());
        assert_eq!(all["filename"], serde_json::json!("notes.txt"));
        assert!(all.contains_key("date_processed"));
        assert!(all.contains_key("has_tables"));

        let config = MetadataConfig {
            include_filename: false,
            include_date_created: false,
            include_date_processed: false,
        };
        let trimmed = doc.metadata.to_metadata(&config);
        assert!(!trimmed.contains_key("filename"));
        assert!(!trimmed.contains_key("date_created"));
        assert!(!trimmed.contains_key("date_processed"));
        assert!(trimmed.contains_key("file_extension"));
    }
}
